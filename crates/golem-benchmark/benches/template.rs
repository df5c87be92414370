use std::hint::black_box;

use codspeed_criterion_compat::{Criterion, Throughput, criterion_group, criterion_main};
use golem_template::{TemplateConfig, split_regions};

static PAGE: &str = r#"<!DOCTYPE html>
<html>
<!-- {{ commented out }} -->
<body>
{{define "row"}}<tr>
{{- range $i, $c := .Cells}}
	<td>{{if $c.Bold}}<b>{{$c.Text}}</b>{{else}}{{$c.Text}}{{end}}</td>
{{- end}}
</tr>{{end}}
<table>
{{- range .Rows }}
	{{ template "row" . }}
{{- else }}
	<tr><td>{{/* empty */}}no rows</td></tr>
{{- end }}
</table>
<p>{{ .Footer | html }}</p>
</body>
</html>
"#;

fn bench_split(c: &mut Criterion) {
    let mut group = c.benchmark_group("split_regions");
    let config = TemplateConfig::default();

    for (name, repeat) in [("page", 1), ("large_page", 50)] {
        let text = PAGE.repeat(repeat);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(name, &text, |b, text| {
            b.iter(|| black_box(split_regions(text, &config)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_split);
criterion_main!(benches);
