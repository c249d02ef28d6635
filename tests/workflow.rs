//! End-to-end workflow over a temporary directory: a downloaded export is
//! adopted, date-stamped, resolved, loaded, summarized, listed, and plotted.

use std::fs;

use futstat::data::{filter, loader};
use futstat::snapshot::SnapshotStore;
use futstat::stats;
use futstat::{histogram, report};

const STEM: &str = "club-analyzer";

const EXPORT: &str = "\
Id,Name,Lastname,Rating,Position,Club,League,Rarity,Loans
1001,Bukayo,Saka,86,23,Arsenal,Premier League,Rare,0
1002,Declan,Rice,84,10,Arsenal,Premier League,Common,0
1003,Martin,Odegaard,87,18,Arsenal,Premier League,Team of the Week,0
1004,Vinicius,Junior,89,27,Real Madrid,LaLiga,Rare,0
1005,Jude,Bellingham,90,14,Real Madrid,LaLiga,Rare,1
1006,Antoine,Griezmann,85,21,Atletico Madrid,LaLiga,Common,0
1007,Cole,Palmer,85,18,Chelsea,Premier League,Rare,0
1008,Mystery,Card,70,99,Chelsea,Premier League,Common,0
";

#[test]
fn download_to_histogram_workflow() {
    let dir = tempfile::tempdir().unwrap();
    let downloads = dir.path().join("downloads");
    let data = dir.path().join("data");
    fs::create_dir_all(&downloads).unwrap();
    fs::write(downloads.join(format!("{STEM}.csv")), EXPORT).unwrap();

    let store = SnapshotStore::new(&data, STEM).with_downloads_dir(&downloads);

    // Adoption moves the download into place and date-stamps it.
    let finalized = store.refresh().unwrap().expect("finalize should rename");
    let name = finalized.file_name().unwrap().to_str().unwrap();
    assert!(name.starts_with(&format!("{STEM}_")), "dated name, got {name}");
    assert!(name.ends_with(".csv"));
    assert!(!downloads.join(format!("{STEM}.csv")).exists());

    let latest = store.latest().unwrap();
    assert_eq!(latest, finalized);

    let roster = loader::load_roster(&latest).unwrap();
    assert_eq!(roster.len(), 8);

    // Statistics over the loaded snapshot.
    let summary = stats::summarize(&roster).unwrap();
    assert_eq!(summary.players, 8);
    assert_eq!(summary.rating_total, 676);
    assert!((summary.rating_mean - 84.5).abs() < 1e-9);
    assert_eq!(summary.rating_median, 85);
    assert_eq!(summary.rating_mode, 85);
    assert_eq!(summary.tiers.gold, 7);
    assert_eq!(summary.tiers.silver, 1);
    assert_eq!(summary.tiers.bronze, 0);

    // League views.
    assert_eq!(filter::leagues(&roster), ["LaLiga", "Premier League"]);
    let listing = report::league_listing(&roster, "Premier League");
    let labels: Vec<&str> = listing.iter().map(|(label, _)| label.as_str()).collect();
    assert_eq!(labels, ["CAM", "CDM", "RW", "Unknown"]);
    assert_eq!(
        listing[0].1,
        ["Cole Palmer [85]", "Martin Odegaard [87][Team of the Week]"]
    );

    // Histogram artifact.
    let stem = finalized.file_stem().unwrap().to_str().unwrap();
    let plot = dir.path().join("plots").join(format!("{stem}.png"));
    histogram::render(&roster, &plot).unwrap();
    let rendered = image::open(&plot).unwrap();
    assert_eq!(rendered.width(), histogram::IMAGE_WIDTH);
    assert_eq!(rendered.height(), histogram::IMAGE_HEIGHT);

    // Nothing left to adopt or finalize; the snapshot set is unchanged.
    assert_eq!(store.refresh().unwrap(), None);
    assert_eq!(store.latest().unwrap(), finalized);
    assert_eq!(store.data_files().unwrap().len(), 1);
}

#[test]
fn undersized_download_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let downloads = dir.path().join("downloads");
    let data = dir.path().join("data");
    fs::create_dir_all(&downloads).unwrap();

    // Header plus a single row is below the adoption threshold.
    let candidate = downloads.join(format!("{STEM}.csv"));
    fs::write(
        &candidate,
        "Id,Name,Lastname,Rating,Position,Club,League,Rarity,Loans\n\
         1001,Bukayo,Saka,86,23,Arsenal,Premier League,Rare,0\n",
    )
    .unwrap();

    let store = SnapshotStore::new(&data, STEM).with_downloads_dir(&downloads);
    assert_eq!(store.refresh().unwrap(), None);

    // The candidate stays where it was and no snapshot appears.
    assert!(candidate.exists());
    assert!(store.latest().is_err());
}
