//! Integration test: generate the Dragonfly model document from the full
//! type registry and check its structure, determinism and agreement with
//! the sample documents.

use std::collections::BTreeSet;
use std::path::PathBuf;

use serde_json::{json, Value};

use dfs_core::TypeRegistry;
use dfs_schema::{
    emit, generate_document, read_instance, ClassMapper, DocumentMetadata, EmitRequest,
    GeneratorOptions, InstanceValidator, OpenApiDocument, BASE_MODEL_NAME, MAPPER_FILE,
    MODEL_ROOT,
};

/// Find the repository root.
fn repo_root() -> PathBuf {
    let mut dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    dir.pop(); // crates/
    dir.pop(); // repo root
    dir
}

fn sample(name: &str) -> PathBuf {
    repo_root().join("samples").join(name)
}

fn registry() -> TypeRegistry {
    dfs_model::registry().unwrap()
}

fn flattened(version: &str) -> OpenApiDocument {
    generate_document(
        &registry(),
        &[MODEL_ROOT],
        &DocumentMetadata::dragonfly_model(version),
        &GeneratorOptions::dragonfly(),
    )
    .unwrap()
}

fn inheritance(add_discriminator: bool) -> OpenApiDocument {
    let options = GeneratorOptions {
        inheritance: true,
        add_discriminator,
        ..GeneratorOptions::dragonfly()
    };
    generate_document(
        &registry(),
        &[MODEL_ROOT],
        &DocumentMetadata::dragonfly_model("1.0.0"),
        &options,
    )
    .unwrap()
}

/// Collect every `$ref` target in `value`.
fn refs(value: &Value, out: &mut BTreeSet<String>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                match (key.as_str(), child) {
                    ("$ref", Value::String(target)) => {
                        out.insert(target.trim_start_matches("#/components/schemas/").to_string());
                    }
                    _ => refs(child, out),
                }
            }
        }
        Value::Array(items) => items.iter().for_each(|item| refs(item, out)),
        _ => {}
    }
}

#[test]
fn test_model_version_default_matches_info_version() {
    let doc = flattened("1.8.0");
    assert_eq!(doc.info.version, "1.8.0");
    assert_eq!(
        doc.schema("Model").unwrap()["properties"]["version"]["default"],
        json!("1.8.0")
    );
}

#[test]
fn test_generation_is_deterministic() {
    let a = serde_json::to_string_pretty(&flattened("1.0.0")).unwrap();
    let b = serde_json::to_string_pretty(&flattened("1.0.0")).unwrap();
    assert_eq!(a, b);

    let doc = flattened("1.0.0");
    let tag_names: Vec<&str> = doc.tags.iter().map(|t| t.name.as_str()).collect();
    let mut sorted = tag_names.clone();
    sorted.sort();
    assert_eq!(doc.tag_groups.len(), 1);
    assert_eq!(doc.tag_groups[0].name, "Models");
    assert_eq!(doc.tag_groups[0].tags, sorted);
}

#[test]
fn test_every_reachable_type_appears_once() {
    let doc = flattened("1.0.0");
    let names: Vec<&str> = doc.schema_names().collect();
    let unique: BTreeSet<&str> = names.iter().copied().collect();
    assert_eq!(names.len(), unique.len());
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);

    let mut referenced = BTreeSet::new();
    refs(&doc.to_value().unwrap()["components"], &mut referenced);
    for target in &referenced {
        assert!(unique.contains(target.as_str()), "dangling reference to {target}");
    }
    for name in ["Model", "Building", "Story", "Room2D", "ContextShade", "LouversByCount"] {
        assert!(unique.contains(name), "{name} missing");
    }
    // Abstract bases are merged away in the flattened layout.
    assert!(!unique.contains("_LouversBase"));
    assert!(!unique.contains(BASE_MODEL_NAME));
    assert_eq!(doc.tags.len(), names.len());
}

#[test]
fn test_flattened_louvers_carry_inherited_fields() {
    let doc = flattened("1.0.0");
    let louvers = doc.schema("LouversByCount").unwrap();
    let properties = louvers["properties"].as_object().unwrap();
    assert_eq!(properties.keys().next().map(String::as_str), Some("type"));
    assert!(properties.contains_key("depth"));
    assert!(properties.contains_key("louver_count"));
    assert_eq!(louvers["additionalProperties"], json!(false));
    assert_eq!(properties["type"]["pattern"], "^LouversByCount$");
}

#[test]
fn test_room2d_window_parameters_shape() {
    let doc = flattened("1.0.0");
    let windows = &doc.schema("Room2D").unwrap()["properties"]["window_parameters"];
    assert_eq!(windows["title"], "Window Parameters");
    assert_eq!(windows["type"], "array");
    assert_eq!(windows["items"]["nullable"], json!(true));
    assert!(windows["items"]["anyOf"].as_array().unwrap().len() >= 6);
}

#[test]
fn test_inheritance_layout() {
    let doc = inheritance(true);
    let base = doc.schema(BASE_MODEL_NAME).unwrap();
    assert_eq!(base["discriminator"]["propertyName"], "type");

    let model = doc.schema("Model").unwrap();
    assert_eq!(model["allOf"][0]["$ref"], format!("#/components/schemas/{BASE_MODEL_NAME}"));
    assert_eq!(model["allOf"][1]["properties"]["version"]["default"], "1.0.0");

    let louvers = doc.schema("LouversByCount").unwrap();
    assert_eq!(louvers["allOf"][0]["$ref"], "#/components/schemas/_LouversBase");
    assert!(doc.schema("_LouversBase").is_some());

    let windows = &doc.schema("Room2D").unwrap()["allOf"][1]["properties"]["window_parameters"];
    let mapping = windows["items"]["discriminator"]["mapping"].as_object().unwrap();
    assert_eq!(mapping["SingleWindow"], "#/components/schemas/SingleWindow");
    assert!(windows["items"].get("oneOf").is_some());
}

#[test]
fn test_inheritance_without_discriminator() {
    let doc = inheritance(false);
    assert!(doc.schema(BASE_MODEL_NAME).unwrap().get("discriminator").is_none());
    let windows = &doc.schema("Room2D").unwrap()["allOf"][1]["properties"]["window_parameters"];
    assert!(windows["items"].get("discriminator").is_none());
}

#[test]
fn test_emit_document_and_mapper() {
    let tmp = tempfile::tempdir().unwrap();
    let registry = registry();
    let doc = flattened("1.0.0");
    let mapper = ClassMapper::from_document(&registry, &doc);
    let written = emit(tmp.path(), &EmitRequest::new(&doc, false).with_mapper(&mapper)).unwrap();
    assert_eq!(written.len(), 2);

    let mapper_json: Value =
        serde_json::from_str(&std::fs::read_to_string(tmp.path().join(MAPPER_FILE)).unwrap())
            .unwrap();
    assert_eq!(mapper_json["classes"]["Model"], "dfs_model::model::Model");
    assert_eq!(
        mapper_json["classes"].as_object().unwrap().len(),
        doc.components.schemas.len()
    );
}

#[test]
fn test_samples_match_generated_schema() {
    let validator = InstanceValidator::new(&registry(), &[MODEL_ROOT]).unwrap();
    for (root, file) in [
        ("Room2D", "room2d_simple.json"),
        ("Story", "story_simple.json"),
        ("Building", "building_simple.json"),
        ("ContextShade", "context_shade_two_tree_canopy.json"),
        ("Model", "model_complete_simple.dfjson"),
    ] {
        let instance = read_instance(&sample(file)).unwrap();
        if let Err(e) = validator.validate(root, &instance) {
            panic!("{file} does not match {root}: {e}");
        }
    }
}

#[test]
fn test_schema_rejects_what_decoder_rejects() {
    let validator = InstanceValidator::new(&registry(), &[MODEL_ROOT]).unwrap();
    let mut room = read_instance(&sample("room2d_simple.json")).unwrap();
    room["type"] = json!("Room3D");
    assert!(validator.validate("Room2D", &room).is_err());
}
