use delhi_metro_dashboard::config::DashboardSettings;
use delhi_metro_dashboard::dashboard::{render_view, Chart, View};
use delhi_metro_dashboard::data::{augment, seeded_rng, Aggregator, DataLoader, TableCache};
use std::path::Path;

const SAMPLE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/Delhi metro.csv");

#[test]
fn test_sample_loads_with_normalized_headers() {
    let df = DataLoader::load_csv(Path::new(SAMPLE)).expect("Failed to load sample");

    assert_eq!(df.height(), 22);
    for column in ["Station_Names", "Metro_Line", "Latitude", "Longitude", "ID_Station_ID"] {
        assert!(df.column(column).is_ok(), "missing {column}");
    }
    assert_eq!(df.column("Latitude").unwrap().null_count(), 2);
}

#[test]
fn test_full_pipeline() {
    let mut cache = TableCache::new();
    let base = cache.get_or_load(Path::new(SAMPLE)).expect("Failed to load sample");

    let mut rng = seeded_rng(42);
    let table = augment(&base, &mut rng).unwrap();
    let top = Aggregator::top_n(&table, "Passenger_Count", 5).unwrap();
    assert_eq!(top.height(), 5);

    let settings = DashboardSettings {
        data: SAMPLE.into(),
        ..Default::default()
    };
    for view in View::ALL {
        let model = render_view(&base, view, &settings).expect("Failed to render");
        assert_eq!(model.view, view);
        assert!(!model.panels.is_empty());
    }

    let maps = render_view(&base, View::MetroMaps, &settings).unwrap();
    assert_eq!(maps.panels.len(), 2);
    match &maps.panels[1].chart {
        Chart::Heatmap(heat) => assert_eq!(heat.points.len(), 20),
        other => panic!("expected heatmap, got {other:?}"),
    }

    let overview = render_view(&base, View::DashboardOverview, &settings).unwrap();
    match &overview.panels[0].chart {
        Chart::Bar(bar) => assert_eq!(bar.bars.len(), 8),
        other => panic!("expected bar chart, got {other:?}"),
    }
}
