use byteindex::{
    BuilderConfig, HEADER_SIZE, IndexReader, IndexWidth, build_index, build_index_with_config,
    entry_count,
};
use std::fs::{self, File};
use std::io::{BufReader, Write};

fn line_starts(data: &[u8], target: u8) -> Vec<u64> {
    data.iter()
        .enumerate()
        .filter(|(_, b)| **b == target)
        .map(|(i, _)| i as u64 + 1)
        .collect()
}

#[test]
fn test_index_file_on_disk() {
    let dir = tempfile::tempdir().expect("err creating temp dir");
    let input_path = dir.path().join("input.txt");
    let index_path = dir.path().join("input.idx");

    let mut data = Vec::new();
    for i in 0..20_000 {
        writeln!(data, "row {i}\tvalue {}", i * 7).unwrap();
    }
    fs::write(&input_path, &data).unwrap();

    let input = File::open(&input_path).unwrap();
    let output = File::create(&index_path).unwrap();
    build_index(input, output, b'\n', IndexWidth::W32, true).expect("err building index");

    let len = fs::metadata(&index_path).unwrap().len();
    assert_eq!(entry_count(len, IndexWidth::W32).unwrap(), 20_001);

    let reader = IndexReader::new(BufReader::new(File::open(&index_path).unwrap())).unwrap();
    assert_eq!(reader.target(), b'\n');
    let entries: Vec<u64> = reader.entries().map(|r| r.unwrap()).collect();

    let mut expected = vec![0];
    expected.extend(line_starts(&data, b'\n'));
    assert_eq!(entries, expected);

    // consecutive entries split the input back into its rows
    for (i, pair) in entries.windows(2).take(3).enumerate() {
        let row = &data[pair[0] as usize..pair[1] as usize];
        assert!(row.starts_with(format!("row {i}\t").as_bytes()));
    }
}

#[test]
fn test_bounded_buffers_across_many_chunks() {
    let dir = tempfile::tempdir().unwrap();
    let index_path = dir.path().join("tabs.idx");

    let data: Vec<u8> = (0..300_000u32)
        .map(|i| if i % 1_000 == 999 { b'\t' } else { b'a' })
        .collect();
    let config = BuilderConfig::default()
        .with_input_buffer_size(4_096)
        .with_output_buffer_entries(16);

    let summary = build_index_with_config(
        &data[..],
        File::create(&index_path).unwrap(),
        b'\t',
        IndexWidth::W16,
        false,
        &config,
    )
    .unwrap();
    assert_eq!(summary.entries, 300);
    assert_eq!(summary.bytes_scanned, 300_000);
    assert_eq!(summary.flushes, 19);

    let bytes = fs::read(&index_path).unwrap();
    assert_eq!(bytes.len(), HEADER_SIZE + 300 * 2);
    assert_eq!(bytes[5], 2);
    assert_eq!(bytes[6], b'\t');

    let entries: Vec<u64> = IndexReader::new(&bytes[..])
        .unwrap()
        .entries()
        .map(|r| r.unwrap())
        .collect();
    let expected: Vec<u64> = line_starts(&data, b'\t')
        .into_iter()
        .map(|p| IndexWidth::W16.wrap(p))
        .collect();
    assert_eq!(entries, expected);
}
