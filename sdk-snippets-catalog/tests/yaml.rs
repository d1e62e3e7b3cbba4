use sdk_snippets_catalog::{
    Catalog, CatalogError, ExampleEntry, Field, Rule, entry_to_string, load_candidate,
    load_candidates, load_catalog, save_catalog, validate,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

use pretty_assertions::assert_eq;

fn write_yaml(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

fn put_object() -> ExampleEntry {
    ExampleEntry::new("s3", "put_object")
        .with_description("Uploads an object to S3")
        .with_code(
            "import { S3Client, PutObjectCommand } from \"@aws-sdk/client-s3\";\n\
             \n\
             const command = new PutObjectCommand({\n\
             \x20 Bucket: \"my-bucket\",\n\
             \x20 Key: \"path/to/file.txt\",\n\
             \x20 Body: \"Hello: world\\n\" // trailing colon: ok\n\
             });\n",
        )
        .with_parameter("Bucket", "Name of the bucket")
        .with_parameter("Key", "Object key (file path)")
        .with_parameter("Body", "File content")
        .with_package("@aws-sdk/client-s3")
}

#[test]
fn load_candidate_from_yaml() {
    let tmp = TempDir::new().unwrap();
    write_yaml(
        tmp.path(),
        "candidate.yaml",
        r#"
service: lambda
method: invoke
description: "Invokes a Lambda function"
code: |
  import { LambdaClient, InvokeCommand } from "@aws-sdk/client-lambda";

  const command = new InvokeCommand({
    FunctionName: "myFunction",
  });
parameters:
  FunctionName: Name of the function
package: "@aws-sdk/client-lambda"
"#,
    );

    let entry = load_candidate(&tmp.path().join("candidate.yaml")).unwrap();
    assert_eq!(entry.service, "lambda");
    assert_eq!(entry.parameters.len(), 1);
    assert_eq!(entry.parameter("FunctionName"), Some("Name of the function"));
    assert!(entry.code.starts_with("import { LambdaClient"));
    assert!(entry.code.contains("\n\nconst command"));
}

#[test]
fn parameters_keep_file_order() {
    let tmp = TempDir::new().unwrap();
    write_yaml(
        tmp.path(),
        "candidate.yaml",
        r#"
service: dynamodb
method: create_table
description: Creates a table
code: "new CreateTableCommand({})"
parameters:
  TableName: a
  KeySchema: b
  AttributeDefinitions: c
  BillingMode: d
package: "@aws-sdk/client-dynamodb"
"#,
    );

    let entry = load_candidate(&tmp.path().join("candidate.yaml")).unwrap();
    let names: Vec<&str> = entry.parameters.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["TableName", "KeySchema", "AttributeDefinitions", "BillingMode"]);
}

#[test]
fn parameters_may_be_omitted_or_null() {
    let tmp = TempDir::new().unwrap();
    write_yaml(
        tmp.path(),
        "omitted.yaml",
        "service: s3\nmethod: list_buckets\ndescription: Lists buckets\ncode: x\npackage: p\n",
    );
    write_yaml(
        tmp.path(),
        "null.yaml",
        "service: s3\nmethod: list_buckets\ndescription: Lists buckets\ncode: x\nparameters:\npackage: p\n",
    );

    assert!(load_candidate(&tmp.path().join("omitted.yaml")).unwrap().parameters.is_empty());
    assert!(load_candidate(&tmp.path().join("null.yaml")).unwrap().parameters.is_empty());
}

#[test]
fn repeated_parameter_reaches_validator() {
    let tmp = TempDir::new().unwrap();
    let record = "service: s3\nmethod: get_object\ndescription: Downloads an object\n\
                  code: x\nparameters:\n  Bucket: first\n  Key: k\n  Bucket: second\npackage: p\n";
    write_yaml(tmp.path(), "one.yaml", record);

    let single = load_candidate(&tmp.path().join("one.yaml")).unwrap();
    let names: Vec<&str> = single.parameters.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Bucket", "Key", "Bucket"]);

    let bulk = load_candidates(&tmp.path().join("one.yaml")).unwrap();
    assert_eq!(bulk, vec![single.clone()]);

    let err = validate(&single).unwrap_err();
    assert_eq!(err.violations.len(), 1);
    assert_eq!(err.violations[0].field, Field::Parameters);
    assert_eq!(err.violations[0].rule, Rule::DuplicateParameter("Bucket".into()));
}

#[test]
fn load_candidates_accepts_single_or_list() {
    let tmp = TempDir::new().unwrap();
    let single = entry_to_string(&put_object()).unwrap();
    write_yaml(tmp.path(), "one.yaml", &single);

    let list = "- service: s3\n  method: a\n  description: d\n  code: c\n  package: p\n\
                - service: s3\n  method: b\n  description: d\n  code: c\n  package: p\n";
    write_yaml(tmp.path(), "many.yaml", list);

    assert_eq!(load_candidates(&tmp.path().join("one.yaml")).unwrap(), vec![put_object()]);
    let many = load_candidates(&tmp.path().join("many.yaml")).unwrap();
    assert_eq!(many.len(), 2);
    assert_eq!(many[1].method, "b");
}

#[test]
fn catalog_round_trips_multiline_code() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("nested").join("snippets.yaml");

    let mut catalog = Catalog::new();
    catalog.upsert(put_object()).unwrap();
    catalog
        .upsert(
            ExampleEntry::new("s3", "delete_object")
                .with_description("Deletes an object")
                .with_code("  indented first line\n\ttab\n\n\ntrailing blank lines\n\n")
                .with_package("@aws-sdk/client-s3"),
        )
        .unwrap();
    save_catalog(&path, &catalog).unwrap();
    assert!(!tmp.path().join("nested").join("snippets.yaml.tmp").exists());

    let loaded = load_catalog(&path).unwrap();
    let before: Vec<&ExampleEntry> = catalog.list().collect();
    let after: Vec<&ExampleEntry> = loaded.list().collect();
    assert_eq!(before, after);
}

#[test]
fn missing_catalog_is_empty() {
    let tmp = TempDir::new().unwrap();
    let catalog = load_catalog(&tmp.path().join("nonexistent.yaml")).unwrap();
    assert!(catalog.is_empty());

    write_yaml(tmp.path(), "blank.yaml", "\n");
    assert!(load_catalog(&tmp.path().join("blank.yaml")).unwrap().is_empty());
}

#[test]
fn invalid_record_reports_index() {
    let tmp = TempDir::new().unwrap();
    write_yaml(
        tmp.path(),
        "snippets.yaml",
        "- service: s3\n  method: a\n  description: d\n  code: c\n  package: p\n\
         - service: s3\n  method: ''\n  description: d\n  code: c\n  package: p\n",
    );

    match load_catalog(&tmp.path().join("snippets.yaml")) {
        Err(CatalogError::Invalid { index, source }) => {
            assert_eq!(index, 1);
            assert_eq!(source.violations.len(), 1);
        }
        other => panic!("expected Invalid, got {other:?}"),
    }
}

#[test]
fn duplicate_key_in_file_rejected() {
    let tmp = TempDir::new().unwrap();
    write_yaml(
        tmp.path(),
        "snippets.yaml",
        "- service: s3\n  method: a\n  description: d\n  code: c\n  package: p\n\
         - service: S3\n  method: A\n  description: d\n  code: c\n  package: p\n",
    );

    assert!(matches!(
        load_catalog(&tmp.path().join("snippets.yaml")),
        Err(CatalogError::DuplicateKey { first: 0, second: 1, .. })
    ));
}

#[test]
fn malformed_yaml_is_parse_error() {
    let tmp = TempDir::new().unwrap();
    write_yaml(tmp.path(), "snippets.yaml", "- service: [unclosed\n");
    assert!(matches!(
        load_catalog(&tmp.path().join("snippets.yaml")),
        Err(CatalogError::Parse { .. })
    ));
}
