use codspeed_criterion_compat::{
    Criterion, Throughput, black_box, criterion_group, criterion_main,
};

static SOURCE: &str = "
func (s *Server) Serve(ctx context.Context, l net.Listener) error {
	for i := 0; i < len(s.handlers); i++ {
		if h, ok := s.handlers[i].(Handler); ok && h != nil {
			go h.Handle(ctx, <-s.conns, 0x1F, 1.5e3, 'x', \"done\\n\", `raw`)
		}
	}
	return nil // unreachable
}
";

static IDENTIFIERS: &str =
    "It was the year when they finally immanentized the Eschaton It was the year when they \
     finally immanentized the Eschaton It was the year when they finally immanentized the \
     Eschaton It was the year when they finally immanentized the Eschaton It was the year when \
     they finally immanentized the Eschaton It was the year when they finally immanentized the \
     Eschaton It was the year when they finally immanentized the Eschaton";

static TEMPLATE: &str = r#"
<ul>
{{- range $i, $item := .Items }}
	<li class="{{if eq $i 0}}first{{end}}">{{ $item.Name | printf "%q" }}</li>
{{- else }}
	<li>{{/* nothing */}}none</li>
{{- end }}
</ul>
"#;

fn iterate(s: &str) {
    use golem_tokenizer::Tokenizer;

    for token in Tokenizer::new(s) {
        black_box(token);
    }
}

fn iterate_template(s: &str) {
    use golem_tokenizer::{Delimiters, HostLanguage, TemplateTokenizer};

    let delimiters = Delimiters::default();
    for token in TemplateTokenizer::new(s, &delimiters, HostLanguage::Html) {
        black_box(token);
    }
}

fn bench_iterate(c: &mut Criterion) {
    let mut group = c.benchmark_group("iterate");

    let source = SOURCE.repeat(30);
    for (name, source) in [("identifiers", IDENTIFIERS), ("go_source", source.as_str())] {
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(name, &source, |b, &s| b.iter(|| iterate(s)));
    }

    let template = TEMPLATE.repeat(30);
    group.throughput(Throughput::Bytes(template.len() as u64));
    group.bench_with_input("template", &template.as_str(), |b, &s| b.iter(|| iterate_template(s)));

    group.finish();
}

criterion_group!(benches, bench_iterate);
criterion_main!(benches);
