use crate::adapter::lookup::{default_lookups, AnonymousLookup, ExtensionLookup};
use crate::adapter::TsvDirectory;
use crate::domain::PhoneNumber;
use crate::ports::outbound::CallerLookup;
use crate::tests::mocks::{CollectLog, FakeLookup, RoutedHttp};
use crate::usecase::IdentificationPipeline;
use common::adapter::NoopLog;
use common::ports::outbound::{HttpResponse, LogLevel};
use std::sync::Arc;

const NUMBER: &str = "0551234567";

fn pipeline(lookups: Vec<Arc<dyn CallerLookup>>) -> IdentificationPipeline {
    IdentificationPipeline::new(lookups, Arc::new(NoopLog))
}

#[test]
fn test_directory_wins_over_remote_source() {
    let directory = Arc::new(TsvDirectory::from_entries([("山田太郎", NUMBER)]));
    let remote = Arc::new(FakeLookup::new("A").hit(NUMBER, "別の名前"));
    let id = pipeline(vec![directory, remote.clone()]).identify(&PhoneNumber::new(NUMBER));
    assert_eq!(id.name.as_deref(), Some("山田太郎"));
    assert_eq!(id.source.as_deref(), Some("電話帳"));
    assert!(remote.calls().is_empty());
}

#[test]
fn test_fallback_order_and_first_hit_wins() {
    let a = Arc::new(FakeLookup::new("A"));
    let b = Arc::new(FakeLookup::new("B").error(NUMBER, "timeout"));
    let c = Arc::new(FakeLookup::new("C").hit(NUMBER, "甲府商店"));
    let d = Arc::new(FakeLookup::new("D").hit(NUMBER, "使われない"));
    let id = pipeline(vec![a.clone(), b.clone(), c.clone(), d.clone()])
        .identify(&PhoneNumber::new(NUMBER));
    assert_eq!(id.name.as_deref(), Some("甲府商店"));
    assert_eq!(id.source.as_deref(), Some("C"));
    assert_eq!(a.calls(), vec![NUMBER]);
    assert_eq!(b.calls(), vec![NUMBER]);
    assert!(d.calls().is_empty());
}

#[test]
fn test_all_sources_fail_is_unknown() {
    let log = Arc::new(CollectLog::default());
    let p = IdentificationPipeline::new(
        vec![
            Arc::new(FakeLookup::new("A").error(NUMBER, "connection refused")),
            Arc::new(FakeLookup::new("B")),
        ],
        log.clone(),
    );
    let id = p.identify(&PhoneNumber::new(NUMBER));
    assert!(id.is_unknown());
    assert_eq!(id.display_name(), "不明");
    assert_eq!(id.display_source(), "unknown");
    assert_eq!(log.messages(LogLevel::Warn), vec!["lookup failed"]);
}

#[test]
fn test_empty_name_is_a_miss() {
    let id = pipeline(vec![
        Arc::new(FakeLookup::new("A").hit(NUMBER, "  ")),
        Arc::new(FakeLookup::new("B").hit(NUMBER, "山梨")),
    ])
    .identify(&PhoneNumber::new(NUMBER));
    assert_eq!(id.source.as_deref(), Some("B"));
}

#[test]
fn test_extension_short_circuits() {
    let directory = Arc::new(TsvDirectory::from_entries([("誰か", "10@192.168.0.1")]));
    let remote = Arc::new(FakeLookup::new("A").hit("10@192.168.0.1", "外部"));
    let id = pipeline(vec![Arc::new(ExtensionLookup), directory, remote.clone()])
        .identify(&PhoneNumber::new("10@192.168.0.1"));
    assert_eq!(id.name.as_deref(), Some("内線"));
    assert_eq!(id.source.as_deref(), Some("内線"));
    assert!(remote.calls().is_empty());
}

#[test]
fn test_anonymous_before_directory() {
    let remote = Arc::new(FakeLookup::new("A"));
    let id = pipeline(vec![
        Arc::new(ExtensionLookup),
        Arc::new(AnonymousLookup),
        remote.clone(),
    ])
    .identify(&PhoneNumber::new("非通知"));
    assert_eq!(id.name.as_deref(), Some("非通知着信"));
    assert!(remote.calls().is_empty());
}

#[test]
fn test_default_chain_falls_through_sites() {
    // telnavi は落ち、jpnumber は 0 件、meiwakucheck で見つかる
    let http = Arc::new(
        RoutedHttp::new()
            .route(
                "https://www.jpnumber.com/searchnumber.do?number=0551234567",
                HttpResponse::new(200, r#"<span class="number-text15">0</span>"#),
            )
            .route(
                "https://meiwakucheck.com/search?tel_no=0551234567",
                HttpResponse::new(200, "<table><tr><td>甲府運送[運送業]</td></tr></table>"),
            ),
    );
    let directory = Arc::new(TsvDirectory::default());
    let p = pipeline(default_lookups(http.clone(), directory, None));
    let id = p.identify(&PhoneNumber::new(NUMBER));
    assert_eq!(id.name.as_deref(), Some("甲府運送"));
    assert_eq!(
        id.source.as_deref(),
        Some("電話番号検索＠迷惑電話チェック `https://meiwakucheck.com/`")
    );
    assert_eq!(
        http.requested(),
        vec![
            "https://www.telnavi.jp/phone/0551234567",
            "https://www.jpnumber.com/searchnumber.do?number=0551234567",
            "https://meiwakucheck.com/search?tel_no=0551234567",
        ]
    );
}
