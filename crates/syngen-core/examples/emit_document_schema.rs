use schemars::schema_for;
use syngen_core::{ChannelRecord, MessageRecord, UserRecord};

fn main() {
    let schemas = [
        ("users.json", schema_for!(Vec<UserRecord>)),
        ("channels.json", schema_for!(Vec<ChannelRecord>)),
        ("<channel>/<day>.json", schema_for!(Vec<MessageRecord>)),
    ];
    for (document, schema) in schemas {
        let json = serde_json::to_string_pretty(&schema).expect("serialize json schema");
        println!("// {document}\n{json}");
    }
}
