// benches/extract.rs
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use office_channel::catalog::{parse_catalog, VersionFamily};
use office_channel::specs::extract;

/// A saved page when present (`.store/pages/*update-history*.html`), else a synthetic one
/// of roughly the published size.
fn load_sample() -> String {
    let saved = std::fs::read_dir(".store/pages").ok().and_then(|dir| {
        dir.filter_map(Result::ok)
            .map(|e| e.path())
            .find(|p| p.to_string_lossy().contains("update-history"))
    });
    if let Some(body) = saved.and_then(|p| std::fs::read_to_string(p).ok()) {
        return body;
    }

    let channels = ["Current Channel", "Monthly Enterprise Channel", "Semi-Annual Enterprise Channel", "Beta Channel"];
    let mut html = String::from("<html><body><table><tr><th>Channel</th><th>Version</th><th>Build</th><th>Release date</th></tr>");
    for i in 0..2000u32 {
        html.push_str(&format!(
            "<tr><td><a href=\"#c\">{}</a></td><td>{}</td><td>{}.{}</td><td>November {}, 2021</td></tr>\n",
            channels[i as usize % channels.len()],
            2000 + i % 100,
            14000 + i,
            20000 + i * 7,
            1 + i % 28
        ));
    }
    html.push_str("</table></body></html>");
    html
}

fn bench_extract(c: &mut Criterion) {
    let doc = load_sample();

    c.bench_function("table_records", |b| {
        b.iter(|| {
            let n = extract(black_box(&doc), 0).map(|rows| rows.count()).unwrap_or(0);
            black_box(n)
        })
    });

    c.bench_function("current_catalog", |b| {
        b.iter(|| {
            let catalog = parse_catalog(black_box(&doc), VersionFamily::Current);
            black_box(catalog.map(|c| c.len()).unwrap_or(0))
        })
    });
}

criterion_group!(benches, bench_extract);
criterion_main!(benches);
