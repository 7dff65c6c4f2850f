#![allow(dead_code)]

use axum::{
    body::{self, Body},
    http::{Method, Request},
    response::Response,
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use vitallink::{
    config::AppConfig,
    dataset::{load_snapshot_from_reader, LoadOptions},
    ml::ForestConfig,
    AppState,
};

/// Five rows, two of them short, with every operational column present.
pub const INVENTORY_CSV: &str = "\
Hospital_ID,Hospital_Name,City,Latitude,Longitude,Item_Name,Category,Quantity_Available,Minimum_Required,Status,Expiry_Date,Daily_Usage,Supplier_Lead_Time,Cost_Per_Unit,Supplier_Name
HOSP-1000,Salem Govt Hospital,Salem,11.6643,78.146,Oxygen Cylinder (B-Type),Respiratory,10,50,CRITICAL,2026-03-01,10,5,200,MedSupply Co
HOSP-1001,Madurai Medical College,Madurai,9.9252,78.1198,Oxygen Cylinder (B-Type),Respiratory,180,50,Normal,2026-05-01,12,3,210,HealthCorp
HOSP-1002,Madurai Medical College,Madurai,9.9252,78.1198,Insulin Vials,Medicine,400,150,Normal,2026-06-01,8,4,300,LifeLine Pharma
HOSP-1003,Rajiv Gandhi Govt General Hospital,Chennai,13.0827,80.2707,Insulin Vials,Medicine,100,150,CRITICAL,2026-07-01,15,6,300,HealthCorp
HOSP-1004,Salem Govt Hospital,Salem,11.6643,78.146,N95 Masks,PPE,900,300,Normal,2026-08-01,6,2,60,MedSupply Co
";

/// No row below its minimum.
pub const HEALTHY_CSV: &str = "\
Hospital_Name,Item_Name,Quantity_Available,Minimum_Required,Latitude,Longitude
Salem Govt Hospital,Insulin Vials,400,150,11.6643,78.146
Madurai Medical College,Insulin Vials,150,150,9.9252,78.1198
";

/// Router over an in-memory snapshot built from CSV text.
pub struct TestApp {
    router: Router,
    pub state: AppState,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_csv(INVENTORY_CSV)
    }

    pub fn with_csv(csv: &str) -> Self {
        let options = LoadOptions {
            backfill_seed: 42,
            forest: ForestConfig {
                n_estimators: 10,
                ..ForestConfig::default()
            },
        };
        let snapshot =
            load_snapshot_from_reader(csv.as_bytes(), &options).expect("fixture should load");
        let state = AppState::new(AppConfig::default(), snapshot);
        let router = vitallink::app(state.clone());
        Self { router, state }
    }

    pub async fn get(&self, uri: &str) -> Response {
        self.request(Method::GET, uri, None).await
    }

    pub async fn request(&self, method: Method, uri: &str, request_id: Option<&str>) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(id) = request_id {
            builder = builder.header("x-request-id", id);
        }
        let request = builder.body(Body::empty()).expect("valid request");
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible")
    }
}

pub async fn response_json(response: Response) -> Value {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body bytes");
    serde_json::from_slice(&bytes).expect("json response")
}
