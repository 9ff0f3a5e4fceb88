use bmkplot::bench::{run_sweep, KeyKind, SweepConfig};
use bmkplot::chart::{present, render, Presentation};
use bmkplot::config::ChartConfig;
use bmkplot::models::Figure;
use std::fs;
use tempfile::TempDir;

const SAMPLE: &str = "#nodes\tmap\tunordered_map\tRBTree\n10\t5.0\t2.0\t4.0\n100\t50.0\t20.0\t40.0\n";

#[test]
fn test_load_render_end_to_end() {
    let dir = TempDir::new().unwrap();
    let config = ChartConfig::nodes().with_input_path(dir.path().join("bmk_measures.txt"));
    fs::write(&config.input_path, SAMPLE).unwrap();

    let table = bmkplot::load(&config.input_path, &config.x_column).unwrap();
    assert_eq!(table.row_count(), 2);
    assert_eq!(table.column_count(), 4);
    assert_eq!(
        table.labels(),
        vec!["#nodes", "map", "unordered_map", "RedBlackTree"]
    );

    let figure = render(&table, &config.title, &config.x_label).unwrap();
    assert_eq!(figure.title, "Benchmarking comparison");
    assert_eq!(figure.series().len(), 3);

    let expected = [
        ("map", vec![(10.0, 5.0), (100.0, 50.0)]),
        ("unordered_map", vec![(10.0, 2.0), (100.0, 20.0)]),
        ("RBTree", vec![(10.0, 4.0), (100.0, 40.0)]),
    ];
    for (series, (label, points)) in figure.series().iter().zip(expected) {
        assert_eq!(series.label, label);
        assert_eq!(series.points, points);
    }
}

#[test]
fn test_write_then_reload_is_identical() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("in.txt");
    let copy = dir.path().join("out.txt");
    fs::write(&source, "x\ty\tz\tw\n50\t0.0125\t0.004\t0.0183\n100\t0.0131\t0.0041\t0.02\n").unwrap();

    let table = bmkplot::load(&source, "#elements").unwrap();
    let mut buf = Vec::new();
    bmkplot::write(&table, &mut buf).unwrap();
    fs::write(&copy, &buf).unwrap();

    assert_eq!(bmkplot::load(&copy, "#elements").unwrap(), table);
}

#[test]
fn test_generated_file_plots() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("bmk_measures_double.txt");
    let out = dir.path().join("chart.json");

    let sweep = SweepConfig::for_kind(KeyKind::Double)
        .with_range(25, 25, 100)
        .with_seed(3);
    let generated = run_sweep(&sweep).unwrap();
    bmkplot::io::save(&generated, &data).unwrap();

    let config = ChartConfig::double().with_input_path(data);
    let table = bmkplot::load(&config.input_path, &config.x_column).unwrap();
    assert_eq!(table, generated);

    let figure = render(&table, &config.title, &config.x_label).unwrap();
    present(&figure, &Presentation::Export(out.clone())).unwrap();

    let saved: Figure = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(saved.title, "Benchmarking comparison (double)");
    assert!(saved.series().iter().all(|s| s.points.len() == 4));
}
