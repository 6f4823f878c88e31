//! Live directory smoke test. Hits the public radio-browser mirrors, so
//! it is opt-in only: `cargo test -p radiodex-core -- --ignored --nocapture`.

use radiodex_core::directory::{DirectoryClient, Filter, PAGE_SIZE};

fn base_url() -> String {
    std::env::var("RADIODEX_DIRECTORY_URL")
        .unwrap_or_else(|_| "https://all.api.radio-browser.info/json".to_string())
}

#[tokio::test]
#[ignore = "network smoke test; run explicitly with --ignored --nocapture"]
async fn bytag_rock_returns_playable_stations() {
    let client = DirectoryClient::new(&base_url()).expect("client");
    let filter = Filter {
        genre: "rock".into(),
        country: String::new(),
    };

    let stations = client.search(&filter, 1).await.expect("directory reachable");
    println!("page 1: {} stations after filtering", stations.len());
    assert!(stations.len() <= PAGE_SIZE as usize);
    for st in &stations {
        assert!(st.url_resolved.starts_with("https://"), "{}", st.url_resolved);
        assert!(!st.name.is_empty());
    }

    let page2 = client.search(&filter, 2).await.expect("page 2");
    println!("page 2: {} stations after filtering", page2.len());
}
