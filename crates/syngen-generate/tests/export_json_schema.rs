use std::fs;
use std::path::Path;

use jsonschema::JSONSchema;
use schemars::schema_for;

use syngen_core::timestamp::DayBoundary;
use syngen_core::{ChannelRecord, MessageRecord, UserRecord};
use syngen_generate::{GenerateOptions, GenerationEngine};

fn compile(schema: schemars::schema::RootSchema) -> JSONSchema {
    let schema = serde_json::to_value(schema).expect("schema json");
    JSONSchema::compile(&schema).expect("compile json schema")
}

fn load(path: &Path) -> serde_json::Value {
    let contents = fs::read_to_string(path).expect("read document");
    serde_json::from_str(&contents).expect("parse document")
}

#[test]
fn exported_documents_match_record_schemas() {
    let out_dir = std::env::temp_dir().join(format!("syngen_schema_{}", uuid::Uuid::new_v4()));
    let options = GenerateOptions {
        users: 6,
        channels: 4,
        messages: 400,
        thread_probability: 0.5,
        seed: Some(77),
        now: Some(1_760_000_000),
        day_boundary: DayBoundary::Utc,
        ..GenerateOptions::default()
    };
    let result = GenerationEngine::new(options)
        .run(&out_dir)
        .expect("generation succeeds");

    let users = compile(schema_for!(Vec<UserRecord>));
    let channels = compile(schema_for!(Vec<ChannelRecord>));
    let messages = compile(schema_for!(Vec<MessageRecord>));

    assert!(users.is_valid(&load(&out_dir.join("users.json"))));
    assert!(channels.is_valid(&load(&out_dir.join("channels.json"))));

    let mut checked = 0;
    for channel in &result.workspace.channels {
        for entry in fs::read_dir(out_dir.join(&channel.name)).expect("channel dir") {
            let path = entry.expect("entry").path();
            let document = load(&path);
            assert!(messages.is_valid(&document), "{} violates schema", path.display());
            checked += 1;
        }
    }
    assert_eq!(checked, result.report.day_files);
}
