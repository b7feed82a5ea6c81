use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use taltree::{Node, Parser};

const SRC: &str = include_str!("../tests/page.html");

fn parse(c: &mut Criterion) {
    let parser = Parser::default();
    c.bench_function("parse page.html", |b| {
        b.iter(|| parser.parse_str(black_box(SRC)).unwrap());
    });
}

fn lookup(c: &mut Criterion) {
    let tree = Parser::default().parse_str(SRC).unwrap();
    c.bench_function("template attribute lookup", |b| {
        b.iter(|| {
            tree.descendants()
                .filter_map(Node::as_element)
                .filter(|e| e.has_attribute(black_box("tal:content")))
                .count()
        });
    });
}

criterion_group!(benches, parse, lookup);
criterion_main!(benches);
