use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sqlclause::{format, format_string, Mode};

fn load_test_file(name: &str) -> String {
    let path = format!("tests/data/unformatted/{}", name);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", path, e));
    // Golden test files use a sentinel to separate input/expected; take only input
    match content.find(")))))__SQLCLAUSE_OUTPUT__(((((") {
        Some(pos) => content[..pos].to_string(),
        None => content,
    }
}

/// A long statement: many CASE and window columns plus a nested WHERE.
fn wide_statement(columns: usize) -> String {
    let mut sql = String::from("SELECT id");
    for i in 0..columns {
        sql.push_str(&format!(
            ", CASE WHEN c{i} > {i} THEN 'hi' ELSE 'lo' END AS band_{i}, \
             SUM(c{i}) OVER (PARTITION BY g ORDER BY id ROWS UNBOUNDED PRECEDING) AS run_{i}"
        ));
    }
    sql.push_str(
        " FROM facts f INNER JOIN dims d ON d.id = f.dim_id \
         WHERE f.kind IN ('a', 'b', 'c') AND f.id IN (SELECT id FROM recent WHERE day > 7) \
         GROUP BY id, g ORDER BY id",
    );
    sql
}

fn bench_format_small(c: &mut Criterion) {
    let sql = "SELECT a, b, c FROM my_table WHERE x = 1 AND y > 2 ORDER BY a\n";
    c.bench_function("format_small", |b| b.iter(|| format(black_box(sql)).unwrap()));
}

fn bench_format_medium(c: &mut Criterion) {
    let sql = load_test_file("102_joins.sql");
    let mode = Mode::default();
    c.bench_function("format_medium", |b| {
        b.iter(|| format_string(black_box(&sql), black_box(&mode)).unwrap())
    });
}

fn bench_format_large(c: &mut Criterion) {
    let sql = wide_statement(200);
    let mode = Mode::default();
    c.bench_function("format_large", |b| {
        b.iter(|| format_string(black_box(&sql), black_box(&mode)).unwrap())
    });
}

fn bench_format_no_safety(c: &mut Criterion) {
    let sql = wide_statement(200);
    let mode = Mode {
        fast: true,
        ..Mode::default()
    };
    c.bench_function("format_no_safety", |b| {
        b.iter(|| format_string(black_box(&sql), black_box(&mode)).unwrap())
    });
}

criterion_group!(
    benches,
    bench_format_small,
    bench_format_medium,
    bench_format_large,
    bench_format_no_safety
);
criterion_main!(benches);
