use std::sync::Arc;

use strokerisk_application::{EmergencyUseCase, ScanUseCase};
use strokerisk_core::config::MockSettings;
use strokerisk_core::hospital::Coordinates;
use strokerisk_core::scan::{RiskFilter, RiskLevel, RiskThresholds, ScanHistory};
use strokerisk_infrastructure::{InMemoryScanHistory, MockScanService, StaticHospitalLocator};

fn scans_with_fixed_score(score: u8) -> ScanUseCase {
    let history: Arc<dyn ScanHistory> = Arc::new(InMemoryScanHistory::new(MockSettings::instant()));
    let scanner = Arc::new(MockScanService::with_fixed_score(
        score,
        history.clone(),
        RiskThresholds::default(),
        MockSettings::instant(),
    ));
    ScanUseCase::new(scanner, history)
}

#[tokio::test]
async fn test_scan_appends_to_history_and_becomes_latest() {
    let scans = scans_with_fixed_score(75);

    let result = scans.analyze("data:image/jpeg;base64,AAAA").await.unwrap();
    assert_eq!(result.risk_level, RiskLevel::High);

    assert_eq!(scans.latest().await.unwrap(), Some(result.clone()));
    let all = scans.history(RiskFilter::All).await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0], result);

    let high = scans.history(RiskFilter::High).await.unwrap();
    assert_eq!(high, vec![result]);
    let low = scans.history(RiskFilter::Low).await.unwrap();
    assert_eq!(low.len(), 1);
    assert_eq!(low[0].risk_score, 15);
}

#[tokio::test]
async fn test_summary_over_history() {
    let scans = scans_with_fixed_score(50);
    scans.analyze("frame").await.unwrap();

    let summary = scans.summary().await.unwrap();
    assert_eq!(summary.total_scans, 2);
    // (15 + 50) / 2 = 32.5, rounded
    assert_eq!(summary.average_risk, 33);
    assert_eq!(summary.latest_level, Some(RiskLevel::Medium));
    assert_eq!((summary.low_count, summary.medium_count, summary.high_count), (1, 1, 0));
    assert_eq!(summary.trend.len(), 2);
}

#[tokio::test]
async fn test_failed_scan_leaves_history_untouched() {
    let scans = scans_with_fixed_score(10);
    assert!(scans.analyze("").await.is_err());
    assert_eq!(scans.history(RiskFilter::All).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_emergency_lookup_uses_default_location() {
    let emergency = EmergencyUseCase::new(
        Arc::new(StaticHospitalLocator::new(MockSettings::instant())),
        Coordinates::new(40.7128, -74.0060),
        "108",
    );

    assert_eq!(emergency.phone_number(), "108");
    let hospitals = emergency.nearest_hospitals(None).await.unwrap();
    assert_eq!(hospitals.len(), 2);
    assert_eq!(hospitals[0].name, "City General Hospital");

    let center = emergency
        .nearest_stroke_center(Some(Coordinates::new(40.7200, -74.0100)))
        .await
        .unwrap()
        .unwrap();
    assert!(center.is_primary_stroke_center);
}
