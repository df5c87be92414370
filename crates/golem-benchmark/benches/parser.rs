use std::hint::black_box;

use codspeed_criterion_compat::{
    BenchmarkId, Criterion, Throughput, criterion_group, criterion_main,
};
use golem_db::{File, RootDatabase};
use golem_template::TemplateConfig;

fn benchmark_parser(c: &mut Criterion) {
    let db = RootDatabase::default();
    let files = vec![
        File::new(
            &db,
            "Simple".into(),
            r#"
package main

func main() {
	println(42)
}
"#
            .to_string(),
            TemplateConfig::default(),
        ),
        File::new(
            &db,
            "Medium".into(),
            r#"
package store

import (
	"errors"
	"sync"
)

type Store[K comparable, V any] struct {
	mu    sync.Mutex
	items map[K]V
}

var ErrMissing = errors.New("missing")

func (s *Store[K, V]) Get(key K) (V, error) {
	s.mu.Lock()
	defer s.mu.Unlock()
	if v, ok := s.items[key]; ok {
		return v, nil
	} else if len(s.items) == 0 {
		var zero V
		return zero, ErrMissing
	}
	for k, v := range s.items {
		switch {
		case k == key:
			return v, nil
		default:
		}
	}
	return *new(V), ErrMissing
}
"#
            .to_string(),
            TemplateConfig::default(),
        ),
    ];

    let mut group = c.benchmark_group("Parser Benchmark");

    for file in files {
        let code_length = file.text(&db).len() as u64;
        group.throughput(Throughput::Bytes(code_length));
        group.bench_with_input(
            BenchmarkId::new("parse_code", file.path(&db)),
            &file,
            |b, &file| {
                b.iter(|| {
                    let parse = golem_parse::parse_source(file.text(&db));
                    black_box(parse);
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, benchmark_parser);
criterion_main!(benches);
