//! Integration tests for the harvester
//!
//! These tests use wiremock to stand up a fake storefront and run the full
//! harvest cycle end-to-end over HTTP.

use shelf_crawler::config::{
    Config, CrawlerConfig, OutputConfig, SelectorConfig, StorefrontConfig, UserAgentConfig,
};
use shelf_crawler::crawler::Harvester;
use shelf_crawler::output::{CsvOutputHandler, OutputHandler};
use shelf_crawler::{CategoryStatus, HarvestError};
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing at the mock storefront
fn create_test_config(base_url: &str, output_dir: &str) -> Config {
    Config {
        storefront: StorefrontConfig {
            base_url: base_url.to_string(),
            search_path: "advanced_search.php".to_string(),
            listing_path: "index.php".to_string(),
            detail_path: "product_info.php".to_string(),
        },
        crawler: CrawlerConfig {
            max_concurrent_categories: 4,
            max_pages_per_category: 10,
            request_timeout_secs: 5,
            ..CrawlerConfig::default()
        },
        user_agent: UserAgentConfig {
            crawler_name: "TestBot".to_string(),
            crawler_version: "1.0.0".to_string(),
            contact_url: "https://example.com/contact".to_string(),
            contact_email: "test@example.com".to_string(),
        },
        output: OutputConfig {
            directory: output_dir.to_string(),
            file_prefix: "products".to_string(),
        },
        selectors: SelectorConfig {
            category_options: "select[name=categories_id] > option".to_string(),
            listing_row: ".productListing-even, .productListing-odd".to_string(),
            row_anchor: ".productListing-pic > a".to_string(),
            row_price: ".productListing-data > b".to_string(),
            upper_bound: "#counters > b.upper".to_string(),
            total_elements: "#counters > b.total".to_string(),
            detail_image: "#details td.image a".to_string(),
            detail_description: "#details td.body".to_string(),
            detail_description_child: 1,
        },
    }
}

fn search_page() -> String {
    r#"<html><body><form><select name="categories_id">
        <option value="">All Categories</option>
        <option value="1">Living Room</option>
        <option value="3">&nbsp;&nbsp;Sofas</option>
        <option value="4">&nbsp;&nbsp;Beds</option>
        <option value="5">Lamps</option>
    </select></form></body></html>"#
        .to_string()
}

fn listing_page(rows: &[(&str, &str, &str)], counters: Option<(u32, u32)>) -> String {
    let rows: String = rows
        .iter()
        .map(|(id, name, price)| {
            format!(
                r#"<tr class="productListing-even"><td class="productListing-pic"><a href="product_info.php?cPath=3&amp;products_id={}&amp;osCsid=abc">{}</a></td><td class="productListing-data"><b>{}</b></td></tr>"#,
                id, name, price
            )
        })
        .collect();
    let counters = counters
        .map(|(upper, total)| {
            format!(
                r#"Displaying <b class="upper">{}</b> of <b class="total">{}</b>"#,
                upper, total
            )
        })
        .unwrap_or_default();

    format!(
        r#"<html><body><table>{}</table><div id="counters">{}</div></body></html>"#,
        rows, counters
    )
}

fn detail_page(image: &str, description: &str) -> String {
    format!(
        r#"<html><body><table id="details"><tr>
            <td class="image"><a href="{}"><img src="thumb.jpg"></a></td>
            <td class="body"><h1>Product</h1><p>{}</p></td>
        </tr></table></body></html>"#,
        image, description
    )
}

async fn mount_listing(
    server: &MockServer,
    category: &str,
    page: &str,
    body: String,
    expected_hits: u64,
) {
    Mock::given(method("GET"))
        .and(path("/index.php"))
        .and(query_param("cPath", category))
        .and(query_param("page", page))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(expected_hits)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_harvest_writes_records() {
    let mock_server = MockServer::start().await;
    let output_dir = TempDir::new().expect("Failed to create temp dir");

    Mock::given(method("GET"))
        .and(path("/advanced_search.php"))
        .respond_with(ResponseTemplate::new(200).set_body_string(search_page()))
        .expect(1)
        .mount(&mock_server)
        .await;

    // Sofas spans two pages
    mount_listing(
        &mock_server,
        "3",
        "1",
        listing_page(
            &[("10", "Corner Sofa", "1 299,00 zł"), ("11", "Sofa Bed", "899,99 zł")],
            Some((2, 3)),
        ),
        1,
    )
    .await;
    mount_listing(
        &mock_server,
        "3",
        "2",
        listing_page(&[("12", "Futon", "450,00 zł")], Some((3, 3))),
        1,
    )
    .await;

    // Beds has no products
    mount_listing(&mock_server, "4", "1", listing_page(&[], None), 1).await;

    // Lamps fits on one page
    mount_listing(
        &mock_server,
        "5",
        "1",
        listing_page(&[("50", "Desk Lamp", "49,50 zł")], Some((1, 1))),
        1,
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/product_info.php"))
        .and(query_param("products_id", "10"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(detail_page("images/corner.jpg", "Grey linen; seats 4")),
        )
        .mount(&mock_server)
        .await;

    // Every other detail page is missing
    Mock::given(method("GET"))
        .and(path("/product_info.php"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let config = create_test_config(
        &mock_server.uri(),
        output_dir.path().to_str().expect("Non UTF-8 temp dir"),
    );
    let harvester = Harvester::new(&config).expect("Failed to create harvester");
    let outcome = harvester.run().await.expect("Harvest failed");

    assert_eq!(outcome.reports.len(), 3);
    assert_eq!(outcome.product_count(), 4);

    let sofas = outcome.report(3).expect("Sofas report missing");
    assert_eq!(sofas.status, CategoryStatus::Complete);
    assert_eq!(sofas.pages_fetched, 2);
    assert_eq!(sofas.category.name, "Sofas");

    let beds = outcome.report(4).expect("Beds report missing");
    assert_eq!(beds.status, CategoryStatus::Empty);
    assert!(beds.products.is_empty());

    let mut handler = CsvOutputHandler::from_config(&config.output);
    let output_path = handler.write_outcome(&outcome).expect("Failed to write records");
    let content = std::fs::read_to_string(&output_path).expect("Failed to read records");
    let lines: Vec<&str> = content.lines().collect();

    assert_eq!(
        lines,
        vec![
            r#""ID";"Active(0/1)";"Name";"Categories (xyz)";"Price";"Description";"ImgSrc""#,
            r#""10";"1";"Corner Sofa";"3";"1299.00";"Grey linen seats 4";"images/corner.jpg""#,
            r#""11";"1";"Sofa Bed";"3";"899.99";"";"""#,
            r#""12";"1";"Futon";"3";"450.00";"";"""#,
            r#""50";"1";"Desk Lamp";"5";"49.50";"";"""#,
        ]
    );
}

#[tokio::test]
async fn test_failing_category_does_not_affect_others() {
    let mock_server = MockServer::start().await;
    let output_dir = TempDir::new().expect("Failed to create temp dir");

    Mock::given(method("GET"))
        .and(path("/advanced_search.php"))
        .respond_with(ResponseTemplate::new(200).set_body_string(search_page()))
        .mount(&mock_server)
        .await;

    mount_listing(
        &mock_server,
        "3",
        "1",
        listing_page(&[("10", "Corner Sofa", "100,00")], Some((1, 1))),
        1,
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/index.php"))
        .and(query_param("cPath", "4"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    mount_listing(
        &mock_server,
        "5",
        "1",
        listing_page(&[("50", "Desk Lamp", "49,50")], Some((1, 1))),
        1,
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/product_info.php"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let config = create_test_config(
        &mock_server.uri(),
        output_dir.path().to_str().expect("Non UTF-8 temp dir"),
    );
    let outcome = Harvester::new(&config)
        .expect("Failed to create harvester")
        .run()
        .await
        .expect("Harvest failed");

    let beds = outcome.report(4).expect("Beds report missing");
    assert!(beds.status.is_error());
    assert!(beds.products.is_empty());

    assert_eq!(outcome.report(3).map(|r| r.products.len()), Some(1));
    assert_eq!(outcome.report(5).map(|r| r.products.len()), Some(1));
    assert_eq!(outcome.product_count(), 2);
}

#[tokio::test]
async fn test_unreachable_search_page_aborts_harvest() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/advanced_search.php"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    // No listing page may be requested once the resolve fails
    Mock::given(method("GET"))
        .and(path("/index.php"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), "unused");
    let result = Harvester::new(&config)
        .expect("Failed to create harvester")
        .run()
        .await;

    assert!(matches!(
        result,
        Err(HarvestError::HttpStatus { status: 503, .. })
    ));
}

#[tokio::test]
async fn test_dry_run_resolution_lists_leaves_only() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/advanced_search.php"))
        .respond_with(ResponseTemplate::new(200).set_body_string(search_page()))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), "unused");
    let categories = Harvester::new(&config)
        .expect("Failed to create harvester")
        .resolve_categories()
        .await
        .expect("Failed to resolve categories");

    let names: Vec<(u32, &str)> = categories
        .iter()
        .map(|c| (c.id, c.name.as_str()))
        .collect();
    assert_eq!(names, vec![(3, "Sofas"), (4, "Beds"), (5, "Lamps")]);
}
