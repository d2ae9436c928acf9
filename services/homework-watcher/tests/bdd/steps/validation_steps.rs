//! BDD step definitions for response validation feature

use cucumber::{given, then, when};

use homework_watcher::validator::extract;

use crate::world::WatcherWorld;

#[given(expr = "an API payload {string}")]
fn api_payload(world: &mut WatcherWorld, body: String) {
    let payload = serde_json::from_str(&body).expect("payload in feature file is not JSON");
    world.payload = Some(payload);
}

#[when("the payload is validated")]
fn payload_is_validated(world: &mut WatcherWorld) {
    let payload = world.payload.as_ref().expect("payload not set");
    world.extract_result = Some(extract(payload));
}

#[then(expr = "the extracted record should equal homeworks entry {int}")]
fn record_equals_entry(world: &mut WatcherWorld, index: usize) {
    let payload = world.payload.as_ref().expect("payload not set");
    let record = world
        .extract_result
        .as_ref()
        .expect("no result")
        .as_ref()
        .expect("validation failed");
    assert_eq!(
        &serde_json::Value::Object(record.clone()),
        &payload["homeworks"][index]
    );
}

#[then(expr = "validation should fail with {string}")]
fn validation_fails(world: &mut WatcherWorld, reason: String) {
    let result = world.extract_result.as_ref().expect("no result");
    match result {
        Ok(record) => panic!("expected validation to fail, got {:?}", record),
        Err(e) => assert_eq!(e.to_string(), reason),
    }
}
