// Model deserialization tests against payloads shaped like Linode API v4 responses

use linode_exporter::models::*;

#[test]
fn test_account_deserialize() {
    let json = r#"{
        "active_since": "2018-01-01T00:01:01",
        "address_1": "123 Main Street",
        "balance": 200.0,
        "balance_uninvoiced": 145.5,
        "capabilities": ["Linodes", "NodeBalancers", "Block Storage", "Object Storage"],
        "city": "Philadelphia",
        "company": "Linode LLC",
        "country": "US",
        "email": "john.smith@linode.com",
        "euuid": "E1AF5EEC-526F-487D-B317EBEB34C87D71",
        "first_name": "John",
        "last_name": "Smith",
        "phone": "215-555-1212",
        "state": "PA",
        "zip": "19102-1234"
    }"#;
    let account: Account = serde_json::from_str(json).unwrap();
    assert_eq!(account.company, "Linode LLC");
    assert_eq!(account.email, "john.smith@linode.com");
    assert_eq!(account.balance, 200.0);
    assert_eq!(account.balance_uninvoiced, Some(145.5));
}

#[test]
fn test_account_without_uninvoiced_balance() {
    let json = r#"{"company": "", "email": "ops@example.com", "balance": 0}"#;
    let account: Account = serde_json::from_str(json).unwrap();
    assert_eq!(account.balance, 0.0);
    assert!(account.balance_uninvoiced.is_none());
}

#[test]
fn test_bucket_with_cluster_and_region() {
    let json = r#"{
        "cluster": "us-east-1",
        "created": "2019-01-01T01:23:45",
        "hostname": "example-bucket.us-east-1.linodeobjects.com",
        "label": "example-bucket",
        "objects": 4,
        "region": "us-east",
        "s3_endpoint": "us-east-1.linodeobjects.com",
        "size": 188318981
    }"#;
    let bucket: Bucket = serde_json::from_str(json).unwrap();
    assert_eq!(bucket.label, "example-bucket");
    assert_eq!(bucket.region.as_deref(), Some("us-east"));
    assert_eq!(bucket.cluster.as_deref(), Some("us-east-1"));
    assert_eq!(bucket.location(), "us-east");
    assert_eq!(bucket.size, 188318981);
    assert_eq!(bucket.objects, 4);
}

#[test]
fn test_bucket_with_cluster_only_falls_back() {
    let json = r#"{"cluster": "eu-central-1", "label": "legacy", "objects": 0, "size": 0}"#;
    let bucket: Bucket = serde_json::from_str(json).unwrap();
    assert!(bucket.region.is_none());
    assert_eq!(bucket.location(), "eu-central-1");
}

#[test]
fn test_object_storage_endpoint_without_s3_hostname() {
    let json = r#"[
        {"endpoint_type": "E1", "region": "us-east", "s3_endpoint": "us-east-1.linodeobjects.com"},
        {"endpoint_type": "E3", "region": "us-iad", "s3_endpoint": null}
    ]"#;
    let endpoints: Vec<ObjectStorageEndpoint> = serde_json::from_str(json).unwrap();
    assert_eq!(endpoints[0].s3_endpoint.as_deref(), Some("us-east-1.linodeobjects.com"));
    assert_eq!(endpoints[1].endpoint_type, "E3");
    assert!(endpoints[1].s3_endpoint.is_none());
}

#[test]
fn test_quota_usage_deserialize() {
    let usage: QuotaUsage = serde_json::from_str(r#"{"quota_limit": 1000000000, "usage": 5000}"#).unwrap();
    assert_eq!(usage.quota_limit, 1e9);
    assert_eq!(usage.usage, Some(5000.0));

    let usage: QuotaUsage = serde_json::from_str(r#"{"quota_limit": 100, "usage": null}"#).unwrap();
    assert!(usage.usage.is_none());
}

#[test]
fn test_nodebalancer_with_null_transfer_fields() {
    let json = r#"{
        "client_conn_throttle": 0,
        "created": "2018-01-01T00:01:01",
        "hostname": "192.0.2.1.ip.linodeusercontent.com",
        "id": 12345,
        "ipv4": "203.0.113.1",
        "ipv6": null,
        "label": null,
        "region": "us-east",
        "tags": [],
        "transfer": {"in": null, "out": null, "total": 1.5},
        "updated": "2018-03-01T00:01:01"
    }"#;
    let nb: NodeBalancer = serde_json::from_str(json).unwrap();
    assert_eq!(nb.id, 12345);
    assert!(nb.label.is_none());
    assert_eq!(nb.region, "us-east");
    assert_eq!(nb.transfer.total, Some(1.5));
    assert!(nb.transfer.out.is_none());
    assert!(nb.transfer.in_.is_none());
}

#[test]
fn test_lke_node_pool_deserialize() {
    let json = r#"{
        "autoscaler": {"enabled": false, "max": 3, "min": 1},
        "count": 3,
        "disk_encryption": "enabled",
        "disks": [],
        "id": 456,
        "labels": {},
        "nodes": [
            {"id": "123456-5f5b4d5a0000", "instance_id": 123458, "status": "ready"},
            {"id": "123456-5f5b4d5a0001", "instance_id": null, "status": "not_ready"},
            {"id": "123456-5f5b4d5a0002", "instance_id": 123460, "status": "recycling"}
        ],
        "tags": ["example tag"],
        "taints": [],
        "type": "g6-standard-4"
    }"#;
    let pool: LkeNodePool = serde_json::from_str(json).unwrap();
    assert_eq!(pool.id, 456);
    assert_eq!(pool.count, 3);
    assert_eq!(pool.type_, "g6-standard-4");
    assert_eq!(pool.nodes[0].instance_id, Some(123458));
    assert_eq!(pool.nodes[0].status, LkeNodeStatus::Ready);
    assert!(pool.nodes[1].instance_id.is_none());
    assert_eq!(pool.nodes[1].status, LkeNodeStatus::NotReady);
    assert_eq!(pool.nodes[2].status, LkeNodeStatus::Unknown);
}

#[test]
fn test_ticket_status_mapping() {
    let json = r#"[
        {"id": 1, "status": "new", "summary": "Having trouble resetting root password"},
        {"id": 2, "status": "open", "summary": "Disk full"},
        {"id": 3, "status": "closed", "summary": "Resolved"},
        {"id": 4, "status": "pending", "summary": "Awaiting customer"}
    ]"#;
    let tickets: Vec<Ticket> = serde_json::from_str(json).unwrap();
    let statuses: Vec<TicketStatus> = tickets.iter().map(|t| t.status).collect();
    assert_eq!(
        statuses,
        vec![TicketStatus::New, TicketStatus::Open, TicketStatus::Closed, TicketStatus::Unknown]
    );
    assert_eq!(tickets[3].status.as_str(), "unknown");
}

#[test]
fn test_instance_stats_netv4_in() {
    let json = r#"{
        "data": {
            "cpu": [[1521483600000, 0.42]],
            "io": {"io": [[1521484800000, 0.19]], "swap": [[1521484800000, 0]]},
            "netv4": {
                "in": [[1521484800000, 2004.36]],
                "out": [[1521484800000, 3928.91]],
                "private_in": [[1521484800000, 0]],
                "private_out": [[1521484800000, 5.6]]
            },
            "netv6": {"in": [], "out": [], "private_in": [], "private_out": []}
        },
        "title": "linode.com - my-linode (linode123456) - day (5 min avg)"
    }"#;
    let stats: InstanceStats = serde_json::from_str(json).unwrap();
    assert_eq!(stats.data.cpu.len(), 1);
    assert_eq!(stats.data.io.swap.len(), 1);
    assert_eq!(stats.data.netv4.in_[0].value(), 2004.36);
    assert_eq!(stats.data.netv4.out[0].value(), 3928.91);
}

#[test]
fn test_volume_deserialize() {
    let json = r#"{
        "created": "2018-01-01T00:01:01",
        "filesystem_path": "/dev/disk/by-id/scsi-0Linode_Volume_my-volume",
        "id": 12345,
        "label": "my-volume",
        "linode_id": 12346,
        "region": "us-east",
        "size": 30,
        "status": "active",
        "tags": []
    }"#;
    let volume: Volume = serde_json::from_str(json).unwrap();
    assert_eq!(volume.id, 12345);
    assert_eq!(volume.label, "my-volume");
    assert_eq!(volume.status, "active");
    assert_eq!(volume.region, "us-east");
}
