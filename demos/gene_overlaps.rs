//! Basic example: find annotated features overlapping a few genomic windows.

use implicit_interval_tree::{parse_records, Builder, IndexConfig};

const FEATURES: &str = "\
# beg end label
11873 14409 DDX11L1
14403 29570 WASH7P
17368 17436 MIR6859-1
29553 31097 MIR1302-2HG
30365 30503 MIR1302-2
34553 36081 FAM138A
";

fn main() -> anyhow::Result<()> {
    let records = parse_records(FEATURES.as_bytes())?;
    let index = records
        .into_iter()
        .collect::<Builder<_>>()
        .build_with(&IndexConfig::interpolated(4));

    let windows = [(14_000u64, 15_000u64), (17_400, 17_401), (30_000, 35_000), (40_000, 41_000)];
    let mut hits = Vec::new();
    for (beg, end) in windows {
        let cost = index.overlap_into(beg, end, &mut hits);
        hits.sort();
        let labels: Vec<_> = hits.iter().filter_map(|r| r.label.as_deref()).collect();
        println!("[{beg}, {end}) cost={cost} -> {labels:?}");
    }

    Ok(())
}
