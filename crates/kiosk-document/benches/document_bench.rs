// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the kiosk-document crate. Page extraction runs on
// every page turn in the viewer, so it is the hot path worth watching.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use kiosk_document::PdfReader;
use kiosk_document::pdf::sample_pdf;

/// Extract the middle page of a synthetic 20-page document.
fn bench_extract_page(c: &mut Criterion) {
    let bytes = sample_pdf(20);
    let reader = match PdfReader::from_bytes(&bytes) {
        Ok(reader) => reader,
        Err(e) => panic!("sample PDF failed to load: {e}"),
    };

    c.bench_function("extract_page (20 pages)", |b| {
        b.iter(|| {
            let page = reader.extract_page(black_box(10));
            black_box(page.map(|bytes| bytes.len()).unwrap_or_default());
        });
    });
}

criterion_group!(benches, bench_extract_page);
criterion_main!(benches);
