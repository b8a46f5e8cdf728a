//! Task definition registration tests

mod fake;

use ecsdeploy::config::definitions::parse_task_definition;
use ecsdeploy::deploy::register::register_task_definition;
use fake::FakePlatform;
use serde_json::json;
use tokio_test::assert_ok;

fn described_definition() -> serde_json::Value {
    json!({
        "taskDefinition": {
            "taskDefinitionArn": "arn:aws:ecs:us-east-1:123456789012:task-definition/web:12",
            "family": "web",
            "revision": 12,
            "status": "ACTIVE",
            "registeredAt": 1700000000.5,
            "registeredBy": "arn:aws:iam::123456789012:user/deployer",
            "compatibilities": ["EC2", "FARGATE"],
            "requiresAttributes": [{"name": "ecs.capability.execution-role-awslogs"}],
            "cpu": "256",
            "memory": "512",
            "networkMode": "awsvpc",
            "executionRoleArn": "arn:aws:iam::123456789012:role/exec",
            "taskRoleArn": "arn:aws:iam::123456789012:role/task",
            "requiresCompatibilities": ["FARGATE"],
            "volumes": [{"name": "data"}],
            "containerDefinitions": [{
                "name": "app",
                "image": "nginx:1.25",
                "environment": [{"name": "MODE", "value": "prod"}]
            }]
        }
    })
}

#[tokio::test]
async fn test_registration_sends_only_allowed_fields() {
    let fake = FakePlatform::new();
    let loaded = parse_task_definition(described_definition()).unwrap();

    let registered = assert_ok!(register_task_definition(&*fake, &loaded).await);
    assert_eq!(registered.name(), "web:1");

    let requests = fake.registered.lock().unwrap().clone();
    assert_eq!(requests.len(), 1);

    let sent = serde_json::to_value(&requests[0]).unwrap();
    let keys: Vec<&str> = sent.as_object().unwrap().keys().map(String::as_str).collect();
    for key in &keys {
        assert!(
            [
                "family",
                "containerDefinitions",
                "cpu",
                "memory",
                "executionRoleArn",
                "taskRoleArn",
                "networkMode",
                "placementConstraints",
                "requiresCompatibilities",
                "proxyConfiguration",
                "volumes",
            ]
            .contains(key),
            "unexpected field {key}"
        );
    }
    assert_eq!(sent["containerDefinitions"][0]["environment"][0]["value"], "prod");
    assert_eq!(sent["volumes"][0]["name"], "data");
}

#[tokio::test]
async fn test_reregistering_a_registered_definition_sends_the_same_request() {
    let fake = FakePlatform::new();
    let loaded = parse_task_definition(described_definition()).unwrap();

    let first = assert_ok!(register_task_definition(&*fake, &loaded).await);
    assert_ok!(register_task_definition(&*fake, &first).await);

    let requests = fake.registered.lock().unwrap().clone();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0], requests[1]);
}
