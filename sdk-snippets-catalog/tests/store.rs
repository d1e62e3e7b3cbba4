use sdk_snippets_catalog::{
    Catalog, ConsistencyWarning, ExampleEntry, Field, Rule, SharedCatalog, Validator,
};

use pretty_assertions::assert_eq;

const INVOKE_CODE: &str = r#"import { LambdaClient, InvokeCommand } from "@aws-sdk/client-lambda";

const client = new LambdaClient({});

const command = new InvokeCommand({
  FunctionName: "myFunction",
  Payload: JSON.stringify({ key: "value" }),
  InvocationType: "RequestResponse" // or "Event" for async
});

const response = await client.send(command);"#;

fn invoke() -> ExampleEntry {
    ExampleEntry::new("lambda", "invoke")
        .with_description("Invokes a Lambda function synchronously or asynchronously")
        .with_code(INVOKE_CODE)
        .with_parameter("FunctionName", "Name of the Lambda function to invoke")
        .with_parameter("Payload", "JSON payload to send to the function")
        .with_parameter("InvocationType", "RequestResponse (sync) or Event (async)")
        .with_package("@aws-sdk/client-lambda")
}

fn invoke_async() -> ExampleEntry {
    ExampleEntry::new("lambda", "invoke_async")
        .with_description("Invokes a Lambda function asynchronously")
        .with_code(
            r#"import { LambdaClient, InvokeCommand } from "@aws-sdk/client-lambda";

const command = new InvokeCommand({
  FunctionName: "myFunction",
  InvocationType: "Event"
});"#,
        )
        .with_parameter("FunctionName", "Name of the Lambda function to invoke")
        .with_parameter("InvocationType", "Always Event")
        .with_package("@aws-sdk/client-lambda")
}

fn delete_function() -> ExampleEntry {
    ExampleEntry::new("lambda", "delete_function")
        .with_description("Deletes a Lambda function")
        .with_code(
            r#"import { LambdaClient, DeleteFunctionCommand } from "@aws-sdk/client-lambda";

const command = new DeleteFunctionCommand({ FunctionName: "myFunction" });"#,
        )
        .with_parameter("FunctionName", "Name of the function to delete")
        .with_package("@aws-sdk/client-lambda")
}

fn seeded() -> Catalog {
    let mut catalog = Catalog::new();
    catalog.upsert(invoke()).unwrap();
    catalog.upsert(delete_function()).unwrap();
    catalog
}

#[test]
fn upsert_then_get_returns_entry() {
    let mut catalog = Catalog::new();
    let outcome = catalog.upsert(invoke()).unwrap();
    assert!(!outcome.is_update());
    assert!(outcome.warnings.is_empty());
    assert_eq!(catalog.get("lambda", "invoke"), Some(&invoke()));
}

#[test]
fn replacement_keeps_position() {
    let mut catalog = Catalog::new();
    catalog.upsert(delete_function()).unwrap();
    catalog.upsert(invoke()).unwrap();
    catalog.upsert(invoke_async()).unwrap();

    let replacement = invoke().with_description("Invokes a function (rewritten sample)");
    let outcome = catalog.upsert(replacement.clone()).unwrap();
    assert_eq!(outcome.previous, Some(invoke()));

    let listed: Vec<&ExampleEntry> = catalog.list().collect();
    assert_eq!(listed.len(), 3);
    assert_eq!(listed[1], &replacement);
    assert_eq!(listed.iter().filter(|e| e.method == "invoke").count(), 1);
}

#[test]
fn renamed_operation_is_a_distinct_entry() {
    let mut catalog = seeded();
    let outcome = catalog.upsert(invoke_async()).unwrap();
    assert!(outcome.previous.is_none());

    let keys: Vec<String> = catalog.keys().map(|k| k.to_string()).collect();
    assert_eq!(
        keys,
        vec!["lambda.invoke", "lambda.delete_function", "lambda.invoke_async"]
    );
    assert_eq!(catalog.get("lambda", "invoke").unwrap(), &invoke());
}

#[test]
fn replacement_with_undeclared_parameter_warns() {
    let mut catalog = seeded();
    let code = INVOKE_CODE.replace(
        "  InvocationType:",
        "  ClientContext: \"eyJjdXN0b20iOnt9fQ==\",\n  InvocationType:",
    );
    let outcome = catalog.upsert(invoke().with_code(code.clone())).unwrap();

    assert!(outcome.is_update());
    assert_eq!(
        outcome.warnings,
        vec![ConsistencyWarning::UndeclaredParameter("ClientContext".into())]
    );
    assert_eq!(catalog.get("lambda", "invoke").unwrap().code, code);

    let report = catalog.validate_all();
    assert_eq!(report.len(), 1);
    assert_eq!(report[0].key.to_string(), "lambda.invoke");
}

#[test]
fn delete_then_get_is_absent() {
    let mut catalog = seeded();
    let removed = catalog.delete("lambda", "invoke").unwrap();
    assert_eq!(removed, invoke());
    assert!(catalog.get("lambda", "invoke").is_none());
    assert!(catalog.delete("lambda", "invoke").is_none());
    assert_eq!(catalog.len(), 1);
}

#[test]
fn schema_violations_leave_catalog_unchanged() {
    let mut catalog = seeded();
    let before: Vec<ExampleEntry> = catalog.list().cloned().collect();

    let cases = [
        (invoke().with_description("x").tap_service(""), Field::Service),
        (invoke().tap_method("  "), Field::Method),
        (invoke().with_parameter("Payload", "again"), Field::Parameters),
    ];
    for (candidate, field) in cases {
        let err = catalog.upsert(candidate).unwrap_err();
        assert!(err.has_violation(field), "{err}");
    }

    let after: Vec<ExampleEntry> = catalog.list().cloned().collect();
    assert_eq!(before, after);
}

#[test]
fn strict_policy_rejects_warnings() {
    let mut catalog = seeded();
    let strict = Validator::new().strict(true);
    let candidate = invoke().with_package("@aws-sdk/client-sqs");

    let err = catalog.upsert_with(&strict, candidate.clone()).unwrap_err();
    assert!(matches!(err.violations[0].rule, Rule::PromotedWarning(_)));
    assert_eq!(catalog.get("lambda", "invoke"), Some(&invoke()));

    assert!(catalog.upsert(candidate).unwrap().is_update());
}

#[test]
fn validate_all_clean_catalog_is_empty() {
    assert!(seeded().validate_all().is_empty());
    assert!(Catalog::new().validate_all().is_empty());
}

#[test]
fn list_is_restartable() {
    let catalog = seeded();
    let first: Vec<&str> = catalog.list().map(|e| e.method.as_str()).collect();
    let second: Vec<&str> = catalog.list().map(|e| e.method.as_str()).collect();
    assert_eq!(first, second);

    let mut a = catalog.list();
    let mut b = catalog.list();
    a.next();
    assert_eq!(b.next().unwrap().method, "invoke");
}

#[test]
fn shared_catalog_readers_see_whole_entries() {
    let shared = SharedCatalog::new(seeded());
    let old = invoke();
    let new = invoke()
        .with_description("Rewritten")
        .with_parameter("Qualifier", "Version or alias");

    let writer = {
        let shared = shared.clone();
        let (old, new) = (old.clone(), new.clone());
        std::thread::spawn(move || {
            for i in 0..200 {
                let next = if i % 2 == 0 { new.clone() } else { old.clone() };
                shared.upsert(next).unwrap();
            }
        })
    };

    for _ in 0..200 {
        let seen = shared.get("lambda", "invoke").unwrap();
        assert!(seen == old || seen == new);
    }
    writer.join().unwrap();
    assert_eq!(shared.len(), 2);
}

/// Field setters the builder does not need outside tests.
trait Tap {
    fn tap_service(self, service: &str) -> Self;
    fn tap_method(self, method: &str) -> Self;
}

impl Tap for ExampleEntry {
    fn tap_service(mut self, service: &str) -> Self {
        self.service = service.to_string();
        self
    }

    fn tap_method(mut self, method: &str) -> Self {
        self.method = method.to_string();
        self
    }
}
