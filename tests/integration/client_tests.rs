//! Integration tests for the endpoint client
//!
//! These tests use wiremock to stand in for the provider and exercise the
//! full request path: URL shaping, retry, envelope decoding, and each
//! endpoint's empty-result policy.

use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tour_atlas::client::{
    build_http_client, AreaListQuery, Fetcher, KeywordQuery, Sleeper,
};
use tour_atlas::config::RetryConfig;
use tour_atlas::{ClientConfig, ErrorKind, TourApi, TourClient, TourError, TransientCause};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Records requested backoff delays instead of sleeping
#[derive(Debug, Default)]
struct RecordingSleeper {
    delays: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    fn delays(&self) -> Vec<Duration> {
        self.delays.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.delays.lock().unwrap().push(duration);
    }
}

/// Creates a client against `base_url` whose backoff is recorded, not slept
fn create_test_client(base_url: &str) -> (TourClient, Arc<RecordingSleeper>) {
    let config = ClientConfig::new("test-key")
        .expect("Failed to create config")
        .with_base_url(base_url)
        .with_retry(RetryConfig {
            max_retries: 3,
            base_delay_ms: 1000,
        });
    let sleeper = Arc::new(RecordingSleeper::default());
    let http = build_http_client(&config).expect("Failed to build HTTP client");
    let fetcher = Fetcher::with_sleeper(http, config.retry, sleeper.clone());
    let client = TourClient::with_fetcher(config, fetcher).expect("Failed to create client");
    (client, sleeper)
}

/// Wraps items in the provider's success envelope
fn envelope(items: Value, total_count: u64) -> Value {
    json!({
        "response": {
            "header": { "resultCode": "0000", "resultMsg": "OK" },
            "body": {
                "items": items,
                "numOfRows": 10,
                "pageNo": 1,
                "totalCount": total_count
            }
        }
    })
}

/// Provider success envelope with no items at all
fn empty_envelope() -> Value {
    envelope(Value::String(String::new()), 0)
}

#[tokio::test]
async fn test_client_error_is_not_retried() {
    let mock_server = MockServer::start().await;
    let (client, sleeper) = create_test_client(&mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/detailCommon1"))
        .respond_with(ResponseTemplate::new(400))
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = client.detail_common("125266").await.unwrap_err();
    assert!(matches!(err, TourError::Client { status: 400, .. }));
    assert_eq!(err.kind(), ErrorKind::Client);
    assert!(sleeper.delays().is_empty());
}

#[tokio::test]
async fn test_server_error_retries_with_backoff() {
    let mock_server = MockServer::start().await;
    let (client, sleeper) = create_test_client(&mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/areaBasedList1"))
        .respond_with(ResponseTemplate::new(503))
        .expect(4)
        .mount(&mock_server)
        .await;

    let err = client
        .area_based_list(&AreaListQuery::new().area("1"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        TourError::Transient {
            retries: 3,
            cause: TransientCause::ServerStatus(503)
        }
    ));
    assert_eq!(err.kind(), ErrorKind::Transient);
    assert_eq!(
        sleeper.delays(),
        vec![
            Duration::from_millis(1000),
            Duration::from_millis(2000),
            Duration::from_millis(4000),
        ]
    );
}

#[tokio::test]
async fn test_server_error_then_success() {
    let mock_server = MockServer::start().await;
    let (client, sleeper) = create_test_client(&mock_server.uri());

    // First call fails, the retry succeeds
    Mock::given(method("GET"))
        .and(path("/areaCode1"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/areaCode1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(
            json!({ "item": [
                { "code": "1", "name": "서울", "rnum": 1 },
                { "code": "6", "name": "부산", "rnum": 2 }
            ]}),
            2,
        )))
        .mount(&mock_server)
        .await;

    let areas = client.area_codes(None).await.expect("area codes");
    assert_eq!(areas.len(), 2);
    assert_eq!(areas[1].name, "부산");
    assert_eq!(sleeper.delays(), vec![Duration::from_millis(1000)]);
}

#[tokio::test]
async fn test_network_error_is_transient() {
    // Nothing listens on port 1
    let (client, sleeper) = create_test_client("http://127.0.0.1:1");

    let err = client.area_codes(None).await.unwrap_err();
    assert!(matches!(
        err,
        TourError::Transient {
            cause: TransientCause::Network(_),
            ..
        }
    ));
    assert_eq!(sleeper.delays().len(), 3);
}

#[tokio::test]
async fn test_identity_parameters_sent() {
    let mock_server = MockServer::start().await;
    let (client, _) = create_test_client(&mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/searchKeyword1"))
        .and(query_param("serviceKey", "test-key"))
        .and(query_param("MobileOS", "ETC"))
        .and(query_param("_type", "json"))
        .and(query_param("keyword", "궁"))
        .respond_with(ResponseTemplate::new(200).set_body_json(empty_envelope()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = client
        .search_keyword(&KeywordQuery::new("궁"))
        .await
        .expect("search");
    assert!(result.is_empty());
    assert_eq!(result.total_count, 0);
}

#[tokio::test]
async fn test_blank_keyword_sends_nothing() {
    let mock_server = MockServer::start().await;
    let (client, _) = create_test_client(&mock_server.uri());

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(empty_envelope()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let err = client
        .search_keyword(&KeywordQuery::new("   "))
        .await
        .unwrap_err();
    assert!(matches!(err, TourError::InvalidParameter(_)));
}

#[tokio::test]
async fn test_list_single_item_normalized() {
    let mock_server = MockServer::start().await;
    let (client, _) = create_test_client(&mock_server.uri());

    // A single match arrives as an object, not an array
    Mock::given(method("GET"))
        .and(path("/areaBasedList1"))
        .and(query_param("areaCode", "1"))
        .and(query_param("contentTypeId", "12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(
            json!({ "item": { "contentid": "126508", "contenttypeid": "12", "title": "경복궁" } }),
            1,
        )))
        .mount(&mock_server)
        .await;

    let result = client
        .area_based_list(&AreaListQuery::new().area("1").content_type_id("12"))
        .await
        .expect("list");

    assert_eq!(result.items.len(), 1);
    assert_eq!(result.items[0].content_id, "126508");
    assert_eq!(result.total_count, 1);
    assert!(!result.has_more());
}

#[tokio::test]
async fn test_list_defaults_when_body_omits_paging() {
    let mock_server = MockServer::start().await;
    let (client, _) = create_test_client(&mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/areaBasedList1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": {
                "header": { "resultCode": "0000" },
                "body": {
                    "items": { "item": [
                        { "contentid": "1", "title": "A" },
                        { "contentid": "2", "title": "B" }
                    ]}
                }
            }
        })))
        .mount(&mock_server)
        .await;

    let result = client
        .area_based_list(&AreaListQuery::new().page(2).rows(5))
        .await
        .expect("list");

    assert_eq!(result.total_count, 2);
    assert_eq!(result.page_no, 2);
    assert_eq!(result.num_of_rows, 5);
}

#[tokio::test]
async fn test_detail_end_to_end() {
    let mock_server = MockServer::start().await;
    let (client, _) = create_test_client(&mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/detailCommon1"))
        .and(query_param("contentId", "125266"))
        .and(query_param("overviewYN", "Y"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(
            json!({ "item": [{
                "contentid": "125266",
                "contenttypeid": "12",
                "title": "국립중앙박물관",
                "addr1": "서울특별시 용산구 서빙고로 137",
                "addr2": "(용산동6가)",
                "areacode": "1",
                "firstimage": "http://tong.visitkorea.or.kr/cms/resource/1.jpg",
                "homepage": "<a href=\"https://www.museum.go.kr\" target=\"_blank\">museum.go.kr</a>",
                "overview": "<p>Korea's largest museum.</p><br>Free admission &amp; guided tours."
            }]}),
            1,
        )))
        .mount(&mock_server)
        .await;

    let detail = client.detail_common("125266").await.expect("detail");

    assert_eq!(detail.content_id(), "125266");
    assert_eq!(
        detail.full_address().as_deref(),
        Some("서울특별시 용산구 서빙고로 137 (용산동6가)")
    );
    assert_eq!(
        detail.item.first_image.as_deref(),
        Some("http://tong.visitkorea.or.kr/cms/resource/1.jpg")
    );
    assert_eq!(
        detail.homepage_url().as_deref(),
        Some("https://www.museum.go.kr")
    );

    let overview = detail.overview_text().expect("overview");
    assert!(!overview.contains('<'));
    assert!(overview.contains("Korea's largest museum."));
    assert!(overview.contains("Free admission & guided tours."));
}

#[tokio::test]
async fn test_detail_without_item_is_not_found() {
    let mock_server = MockServer::start().await;
    let (client, _) = create_test_client(&mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/detailCommon1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(empty_envelope()))
        .mount(&mock_server)
        .await;

    let err = client.detail_common("999999").await.unwrap_err();
    assert!(matches!(
        err,
        TourError::NotFound { ref content_id, status: 404 } if content_id == "999999"
    ));
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_detail_with_empty_item_list_is_not_found() {
    let mock_server = MockServer::start().await;
    let (client, _) = create_test_client(&mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/detailCommon1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({ "item": [] }), 0)))
        .mount(&mock_server)
        .await;

    let err = client.detail_common("125266").await.unwrap_err();
    assert!(matches!(err, TourError::NotFound { status: 404, .. }));
}

#[tokio::test]
async fn test_invalid_content_id_sends_nothing() {
    let mock_server = MockServer::start().await;
    let (client, _) = create_test_client(&mock_server.uri());

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(empty_envelope()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let err = client.detail_images("12&x=1").await.unwrap_err();
    assert!(matches!(err, TourError::InvalidParameter(_)));
}

#[tokio::test]
async fn test_optional_panels_without_item() {
    let mock_server = MockServer::start().await;
    let (client, _) = create_test_client(&mock_server.uri());

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(empty_envelope()))
        .mount(&mock_server)
        .await;

    assert!(client.detail_images("125266").await.expect("images").is_empty());
    assert!(client.detail_pet_tour("125266").await.expect("pet").is_none());
    assert!(client
        .detail_intro("125266", "12")
        .await
        .expect("intro")
        .is_none());
}

#[tokio::test]
async fn test_optional_panels_on_404() {
    let mock_server = MockServer::start().await;
    let (client, sleeper) = create_test_client(&mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/detailImage1"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/detailPetTour1"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    assert!(client.detail_images("125266").await.expect("images").is_empty());
    assert!(client.detail_pet_tour("125266").await.expect("pet").is_none());
    assert!(sleeper.delays().is_empty());
}

#[tokio::test]
async fn test_images_and_pet_info_decoded() {
    let mock_server = MockServer::start().await;
    let (client, _) = create_test_client(&mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/detailImage1"))
        .and(query_param("numOfRows", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(
            json!({ "item": {
                "contentid": "125266",
                "originimgurl": "http://img/1.jpg",
                "smallimageurl": "http://img/1_s.jpg",
                "serialnum": "1"
            }}),
            1,
        )))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/detailPetTour1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(
            json!({ "item": [{
                "contentid": "125266",
                "acmpyTypeCd": "일부구역 동반가능",
                "acmpyNeedMtr": "목줄 착용"
            }]}),
            1,
        )))
        .mount(&mock_server)
        .await;

    let images = client.detail_images("125266").await.expect("images");
    assert_eq!(images.len(), 1);
    assert_eq!(images[0].origin_url.as_deref(), Some("http://img/1.jpg"));

    let pet = client
        .detail_pet_tour("125266")
        .await
        .expect("pet")
        .expect("pet info present");
    assert_eq!(pet.requirements.as_deref(), Some("목줄 착용"));
}

#[tokio::test]
async fn test_blank_pet_record_is_none() {
    let mock_server = MockServer::start().await;
    let (client, _) = create_test_client(&mock_server.uri());

    // Record present, but every policy field is blank
    Mock::given(method("GET"))
        .and(path("/detailPetTour1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(
            json!({ "item": { "contentid": "1", "acmpyTypeCd": "" } }),
            1,
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    assert!(client.detail_pet_tour("1").await.expect("pet").is_none());
}

#[tokio::test]
async fn test_intro_fields() {
    let mock_server = MockServer::start().await;
    let (client, _) = create_test_client(&mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/detailIntro1"))
        .and(query_param("contentTypeId", "12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(
            json!({ "item": {
                "contentid": "125266",
                "contenttypeid": "12",
                "usetime": "10:00~18:00",
                "restdate": "1월 1일",
                "parking": ""
            }}),
            1,
        )))
        .mount(&mock_server)
        .await;

    let intro = client
        .detail_intro("125266", "12")
        .await
        .expect("intro")
        .expect("intro present");
    assert_eq!(intro.field("usetime").as_deref(), Some("10:00~18:00"));
    assert_eq!(intro.field("parking"), None);
}

#[tokio::test]
async fn test_provider_error_code() {
    let mock_server = MockServer::start().await;
    let (client, sleeper) = create_test_client(&mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/areaCode1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resultCode": "10",
            "resultMsg": "INVALID_REQUEST_PARAMETER_ERROR"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = client.area_codes(None).await.unwrap_err();
    assert!(matches!(err, TourError::Provider { ref code, .. } if code == "10"));
    assert!(sleeper.delays().is_empty());
}

#[tokio::test]
async fn test_gateway_xml_error() {
    let mock_server = MockServer::start().await;
    let (client, _) = create_test_client(&mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/areaCode1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "<OpenAPI_ServiceResponse><cmmMsgHeader>\
             <errMsg>SERVICE ERROR</errMsg>\
             <returnAuthMsg>SERVICE_KEY_IS_NOT_REGISTERED_ERROR</returnAuthMsg>\
             <returnReasonCode>30</returnReasonCode>\
             </cmmMsgHeader></OpenAPI_ServiceResponse>",
        ))
        .mount(&mock_server)
        .await;

    let err = client.area_codes(None).await.unwrap_err();
    assert!(matches!(err, TourError::Provider { ref code, .. } if code == "30"));
}
