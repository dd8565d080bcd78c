use async_trait::async_trait;
use chrono::{Local, TimeZone};
use dublin_data::bikes::{BikeStations, parse_station};
use dublin_data::config::StopConfig;
use dublin_data::snapshot::Snapshot;
use dublin_data::transport::rtpi::parse_response;
use dublin_data::transport::{
    AggregateOptions, ArrivalSource, Category, FetchError, StopResponse, TransitError, Transport,
};
use dublin_data::weather::parse_forecast;

/// Serves recorded RTPI responses by stop id.
struct Recorded;

#[async_trait]
impl ArrivalSource for Recorded {
    async fn fetch(&self, stop_id: &str) -> Result<StopResponse, FetchError> {
        let body: &[u8] = match stop_id {
            "1234" => include_bytes!("fixtures/rtpi_1234.json"),
            "5678" => include_bytes!("fixtures/rtpi_5678.json"),
            "LUAS24" => include_bytes!("fixtures/rtpi_no_data.json"),
            _ => br#"{"errorcode": "2", "errormessage": "Invalid stop"}"#,
        };
        parse_response(body)
    }
}

fn transport(bus_stops: Vec<StopConfig>) -> Transport<Recorded> {
    Transport::new(
        Recorded,
        bus_stops,
        vec![StopConfig::new("Harcourt", "LUAS24")],
        AggregateOptions::new(2),
    )
}

#[tokio::test]
async fn test_full_pipeline() {
    let transport = transport(vec![
        StopConfig::new("MainSt", "1234"),
        StopConfig::new("Church", "5678"),
    ]);

    let transit = transport.all().await.expect("recorded stops aggregate");
    let bikes: BikeStations = [(
        "Portobello".to_string(),
        parse_station(include_bytes!("fixtures/dublinbikes_34.json")).unwrap(),
    )]
    .into_iter()
    .collect();
    assert_eq!(bikes.get("Portobello").unwrap().bike_stands, 30);
    let weather = parse_forecast(include_bytes!("fixtures/darksky.json")).unwrap();
    let at = Local.with_ymd_and_hms(2026, 10, 19, 8, 5, 0).unwrap();

    let json = serde_json::to_value(Snapshot::new(transit, bikes, weather, at)).unwrap();

    // Church's 46A is owned by MainSt; only its 145 survives.
    let inbound = json["BUS"]["Inbound"].as_array().unwrap();
    assert_eq!(inbound.len(), 2);
    assert_eq!(inbound[0]["duetime"], "Due");
    assert_eq!(inbound[0]["stop"], "MainSt");
    assert_eq!(inbound[1]["route"], "145");
    assert_eq!(inbound[1]["stop"], "Church");

    assert_eq!(json["BUS"]["Outbound"][0]["destination"], "Dun Laoghaire");
    assert_eq!(json["LUAS"]["Inbound"], serde_json::json!([]));
    assert_eq!(json["LUAS"]["Outbound"], serde_json::json!([]));

    assert_eq!(json["BIKE"]["Portobello"]["available_bikes"], 12);
    assert_eq!(json["weather"]["currently"]["temperature"], 12.0);
    assert_eq!(json["weather"]["text"]["wind"], "westerly, 20.12km/h (gusts of up to 40.23km/h).");
    assert_eq!(json["weather"]["text"]["hourly"], "Drizzle until 10 minutes past noon.");
    assert_eq!(json["timestamp_str"], "08:05:00 on Monday 19 October 2026");
}

#[tokio::test]
async fn test_provider_fault_surfaces_per_category() {
    let transport = transport(vec![
        StopConfig::new("MainSt", "1234"),
        StopConfig::new("Closed", "9999"),
    ]);

    let err = transport.category("bus").await.unwrap_err();
    match err {
        TransitError::ProviderFault { category, stop, code, message } => {
            assert_eq!(category, Category::Bus);
            assert_eq!(stop, "Closed");
            assert_eq!(code, "2");
            assert_eq!(message, "Invalid stop");
        }
        other => panic!("unexpected error: {other}"),
    }

    let luas = transport.category("LUAS").await.unwrap();
    assert_eq!(luas.total(), 0);
}
