//! Integration tests against the live DuckDuckGo endpoints.
//!
//! These tests are marked with `#[ignore]` by default because they require
//! network access and may be slow or flaky.
//!
//! Run with: `cargo test --test integration -- --ignored`

use ddg_search::{
    Address, DdgClient, ImageFilters, ImageSize, PlaceQuery, SearchQuery, TimeLimit,
};

fn client() -> DdgClient {
    DdgClient::new().expect("client should build")
}

mod text_tests {
    use super::*;

    #[tokio::test]
    #[ignore]
    async fn test_text_search() {
        let results = client()
            .search_text(&SearchQuery::new("rust programming"))
            .await
            .unwrap();
        println!("Text search returned {} results", results.len());
        for (i, result) in results.iter().take(3).enumerate() {
            println!("  {}. {} - {}", i + 1, result.title, result.href);
        }
        assert!(results.len() >= 28, "Text search should fill the default target");
    }

    #[tokio::test]
    #[ignore]
    async fn test_text_search_non_ascii_query() {
        let results = client()
            .search_text(&SearchQuery::new("Rust 编程语言").with_region("cn-zh"))
            .await
            .unwrap();
        // May or may not return results for Chinese queries
        println!("Chinese query returned {} results", results.len());
    }
}

mod image_tests {
    use super::*;

    #[tokio::test]
    #[ignore]
    async fn test_image_search() {
        let filters = ImageFilters {
            size: Some(ImageSize::Large),
            ..Default::default()
        };
        let results = client()
            .search_images(&SearchQuery::new("ferris crab").with_max_results(20), &filters)
            .await
            .unwrap();
        println!("Image search returned {} results", results.len());
        assert!(!results.is_empty(), "Image search should return results");
        assert!(results.iter().all(|r| !r.image.is_empty()));
    }
}

mod news_tests {
    use super::*;

    #[tokio::test]
    #[ignore]
    async fn test_news_search() {
        let query = SearchQuery::new("technology").with_time_limit(TimeLimit::Week);
        let results = client().search_news(&query).await.unwrap();
        println!("News search returned {} results", results.len());
        for result in results.iter().take(3) {
            println!("  [{}] {}", result.date, result.title);
        }
        assert!(results.windows(2).all(|pair| pair[0].date >= pair[1].date));
    }
}

mod maps_tests {
    use super::*;

    #[tokio::test]
    #[ignore]
    async fn test_places_search() {
        let address = Address {
            city: Some("Reykjavik".to_string()),
            country: Some("Iceland".to_string()),
            ..Default::default()
        };
        let query = PlaceQuery::new("museum", address);
        let results = client().search_places(&query).await.unwrap();
        println!("Places search returned {} results", results.len());
        for place in results.iter().take(3) {
            println!("  {} - {}", place.title, place.address);
        }
        assert!(!results.is_empty(), "Places search should return results");
    }
}

mod translate_tests {
    use super::*;

    #[tokio::test]
    #[ignore]
    async fn test_translate() {
        let results = client()
            .translate(&["bonjour le monde", "merci"], None, "en")
            .await
            .unwrap();
        for translation in &results {
            println!(
                "  {} -> {} ({:?})",
                translation.original, translation.translated, translation.detected_language
            );
        }
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].original, "bonjour le monde");
    }
}
