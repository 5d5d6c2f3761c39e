use std::fmt::Write;
use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use jsonbaud::{chunk_utils::chunks_of, Node, ParseStatus, Parser, TreeBuilder};

fn sample_document(records: usize) -> String {
    let mut text = String::from("[");
    for i in 0..records {
        if i > 0 {
            text.push_str(", ");
        }
        write!(
            text,
            r#"{{"id" : {i}, "name" : "record-{i}", "score" : {}.5, "tags" : ["a", "b\n"], "ok" : true, "note" : null}}"#,
            i % 100
        )
        .unwrap();
    }
    text.push(']');
    text
}

fn bench_parse(c: &mut Criterion) {
    let doc = sample_document(200);

    c.bench_function("parse_whole", |b| {
        b.iter(|| black_box(doc.as_str()).parse::<Node>().unwrap());
    });

    c.bench_function("parse_chunked_64", |b| {
        let chunks = chunks_of(&doc, 64);
        b.iter(|| {
            let mut parser = Parser::new();
            let mut tree = TreeBuilder::new();
            for chunk in &chunks {
                parser.feed(black_box(chunk));
                assert_eq!(parser.parse(&mut tree).unwrap(), ParseStatus::Pending);
            }
            parser.close();
            loop {
                match parser.parse(&mut tree).unwrap() {
                    ParseStatus::Pending => {}
                    ParseStatus::Complete => break,
                }
            }
            tree.into_root()
        });
    });
}

criterion_group!(benches, bench_parse);
criterion_main!(benches);
