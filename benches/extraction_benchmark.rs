use albumscout::{extract_links, parse_search_page, Query, ScoutOptions};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use scraper::Html;

fn search_page(posts: usize) -> String {
    let mut html = String::from("<html><head><title>Search Results</title></head><body><main>");
    for i in 0..posts {
        html.push_str(&format!(
            r#"<article id="post-{i}" class="post type-post">
                <header><h2 class="entry-title"><a href="/2025/04/post-{i}/">Session {i}</a></h2></header>
                <div class="entry-meta"><time class="entry-date published">April {day}, 2025</time></div>
                <div class="entry-summary"><p>Liner notes for session {i}.</p></div>
            </article>"#,
            day = i % 28 + 1
        ));
    }
    html.push_str("</main></body></html>");
    html
}

fn post_page(links: usize) -> String {
    let mut html = String::from(r#"<html><body><article><div class="entry-content">"#);
    for i in 0..links {
        let host = if i % 3 == 0 { "pixeldrain.com" } else { "example.org" };
        html.push_str(&format!(
            r#"<p><a href="https://{host}/u/{i}">Quintet - Session Take {i}</a></p>"#
        ));
    }
    html.push_str("</div></article></body></html>");
    html
}

fn bench_search_page(c: &mut Criterion) {
    let options = ScoutOptions::default();
    let mut group = c.benchmark_group("search_page");

    for posts in [10, 50, 200] {
        let html = search_page(posts);
        group.throughput(Throughput::Bytes(html.len() as u64));
        group.bench_with_input(BenchmarkId::new("posts", posts), &html, |b, html| {
            b.iter(|| {
                std::hint::black_box(parse_search_page(
                    "https://tonepoet.fans/?s=session",
                    std::hint::black_box(html),
                    &options,
                ))
            });
        });
    }

    group.finish();
}

fn bench_post_links(c: &mut Criterion) {
    let options = ScoutOptions::default();
    let query = Query::new("session").unwrap();
    let mut group = c.benchmark_group("post_links");

    for links in [20, 200, 1000] {
        let html = post_page(links);
        group.throughput(Throughput::Bytes(html.len() as u64));
        group.bench_with_input(BenchmarkId::new("links", links), &html, |b, html| {
            b.iter(|| {
                let document = Html::parse_document(std::hint::black_box(html));
                std::hint::black_box(extract_links(&document, &query, &options))
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_search_page, bench_post_links);
criterion_main!(benches);
