use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use nodepath::{NodeId, PathExpressionParser, Tree};

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    let parser = PathExpressionParser::new();

    group.bench_function("absolute", |b| {
        b.iter(|| parser.parse(black_box("/reports/2024/Q1/summary")));
    });

    group.bench_function("parent_relative", |b| {
        b.iter(|| parser.parse(black_box("../siblings/cousin")));
    });

    group.bench_function("with_accessor", |b| {
        b.iter(|| parser.parse(black_box("../a/b@Name.Sub")));
    });

    group.bench_function("padded", |b| {
        b.iter(|| parser.parse(black_box("/  a  //  b \\ c  /")));
    });

    group.bench_function("illegal", |b| {
        b.iter(|| parser.try_parse(black_box("/reports/a*b")));
    });

    group.finish();
}

fn deep_tree(depth: usize, fanout: usize) -> (Tree, NodeId) {
    let mut tree = Tree::new(());
    let mut parent = tree.root();
    for level in 0..depth {
        let mut next = parent;
        for index in 0..fanout {
            let id = tree
                .insert(parent, &format!("n{level}_{index}"), ())
                .expect("unique names");
            if index == 0 {
                next = id;
            }
        }
        parent = next;
    }
    (tree, parent)
}

fn bench_find(c: &mut Criterion) {
    let mut group = c.benchmark_group("find");

    for depth in [4, 16, 64] {
        let (tree, deepest) = deep_tree(depth, 8);
        let path = tree.get(deepest).expect("node exists").full_path().to_string();

        group.bench_with_input(BenchmarkId::new("absolute", depth), &path, |b, path| {
            b.iter(|| tree.find(tree.root(), black_box(path)));
        });

        group.bench_with_input(BenchmarkId::new("find_root", depth), &deepest, |b, &id| {
            b.iter(|| tree.find_root(black_box(id)));
        });
    }

    let (tree, deepest) = deep_tree(8, 8);
    group.bench_function("empty_path", |b| {
        b.iter(|| tree.find(black_box(deepest), black_box("")));
    });

    group.finish();
}

criterion_group!(benches, bench_parse, bench_find);
criterion_main!(benches);
