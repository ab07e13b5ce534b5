mod common;

use common::{example_records, session, RawClient, TestServer};
use ferrous_lookup_application::use_cases::{LookupResult, SessionOptions, SessionState};
use ferrous_lookup_domain::{
    Config, DnsRecord, LookupTarget, Message, MessageContent, MessageType, RecordType,
    NOT_FOUND_CONTENT, REPLY_TOO_LARGE_CONTENT,
};
use std::time::Duration;

fn options() -> SessionOptions {
    SessionOptions {
        receive_timeout: Duration::from_secs(2),
        ..SessionOptions::default()
    }
}

#[tokio::test]
async fn test_end_to_end_scenario() {
    let config = Config::from_toml(
        r#"
        [settings]
        server_address = "127.0.0.1"
        server_port = 11000

        [client]
        queries = ["example.com", "unknown.domain"]

        [[records]]
        name = "example.com"
        type = "A"
        value = "93.184.216.34"
        "#,
    )
    .unwrap();
    config.validate().unwrap();

    let server = TestServer::start(config.load_records().unwrap()).await;
    let report = session(server.addr, options())
        .await
        .run(&config.lookup_targets().unwrap())
        .await
        .unwrap();

    assert!(report.welcomed);
    assert!(report.ended);
    assert_eq!(report.state, SessionState::Closed);
    assert_eq!(report.acks_sent, 1);

    assert_eq!(
        report.outcomes[0].result,
        LookupResult::Resolved {
            reply_id: 2,
            record: DnsRecord::new("example.com", RecordType::A, "93.184.216.34"),
        }
    );
    assert_eq!(
        report.outcomes[1].result,
        LookupResult::NotFound {
            reply_id: 3,
            reason: NOT_FOUND_CONTENT.to_string(),
        }
    );

    server.stop().await;
}

#[tokio::test]
async fn test_protocol_sequence_message_by_message() {
    let server = TestServer::start(example_records()).await;
    let client = RawClient::connect(server.addr).await;

    client.send(&Message::hello(1)).await;
    let welcome = client.recv().await;
    assert_eq!(welcome.msg_type, MessageType::Welcome);

    client
        .send(&Message::lookup(2, LookupTarget::Name("example.com".to_string())))
        .await;
    let reply = client.recv().await;
    assert_eq!(reply.msg_type, MessageType::DNSLookupReply);
    assert_eq!(reply.id, 2);
    assert_eq!(
        reply.content,
        MessageContent::Record(DnsRecord::new("example.com", RecordType::A, "93.184.216.34"))
    );

    client.send(&Message::ack(reply.id)).await;
    assert!(client.try_recv(Duration::from_millis(200)).await.is_none());

    client
        .send(&Message::lookup(3, LookupTarget::Name("unknown.domain".to_string())))
        .await;
    let miss = client.recv().await;
    assert_eq!(miss.msg_type, MessageType::Error);
    assert_eq!(miss.content.as_text(), Some(NOT_FOUND_CONTENT));

    client.send(&Message::client_end(4)).await;
    let end = client.recv().await;
    assert_eq!(end.msg_type, MessageType::End);
    assert_eq!(end.content.as_text(), Some("End of DNSLookup"));

    server.stop().await;
}

#[tokio::test]
async fn test_typed_lookup_over_the_wire() {
    let server = TestServer::start(example_records()).await;
    let targets: Vec<LookupTarget> = vec![
        "example.com AAAA".parse().unwrap(),
        "www.example.com A".parse().unwrap(),
    ];

    let report = session(server.addr, options())
        .await
        .run(&targets)
        .await
        .unwrap();

    match &report.outcomes[0].result {
        LookupResult::Resolved { record, .. } => {
            assert_eq!(record.record_type, RecordType::AAAA)
        }
        other => panic!("expected AAAA record, got {:?}", other),
    }
    assert!(matches!(
        report.outcomes[1].result,
        LookupResult::NotFound { .. }
    ));
    assert_eq!(report.acks_sent, 1);

    server.stop().await;
}

#[tokio::test]
async fn test_concurrent_clients_only_see_their_own_replies() {
    let server = TestServer::start(example_records()).await;

    let mut handles = Vec::new();
    for (name, expected) in [
        ("example.com", Some("93.184.216.34")),
        ("www.example.com", Some("example.com")),
        ("unknown.domain", None),
    ] {
        let addr = server.addr;
        handles.push(tokio::spawn(async move {
            let client = RawClient::connect(addr).await;
            for id in 0..20u32 {
                client
                    .send(&Message::lookup(id, LookupTarget::Name(name.to_string())))
                    .await;
                let reply = client.recv().await;
                assert_eq!(reply.id, id);
                match expected {
                    Some(value) => {
                        assert_eq!(reply.content.as_record().unwrap().value, value)
                    }
                    None => assert_eq!(reply.msg_type, MessageType::Error),
                }
            }
        }));
    }

    for handle in handles {
        handle.await.unwrap();
    }
    server.stop().await;
}

#[tokio::test]
async fn test_session_times_out_without_server() {
    let silent = tokio::net::UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let addr = silent.local_addr().unwrap();

    let err = session(
        addr,
        SessionOptions {
            receive_timeout: Duration::from_millis(100),
            ..SessionOptions::default()
        },
    )
    .await
    .run(&[])
    .await
    .unwrap_err();

    assert!(err.is_terminal());
}

#[tokio::test]
async fn test_oversized_record_does_not_stall_the_session() {
    let mut records = example_records();
    records.push(DnsRecord::new("big.example", RecordType::TXT, "x".repeat(1000)));
    let server = TestServer::start(records).await;

    let targets: Vec<LookupTarget> = vec![
        "big.example".parse().unwrap(),
        "example.com".parse().unwrap(),
    ];
    let report = session(
        server.addr,
        SessionOptions {
            receive_timeout: Duration::from_millis(500),
            ..SessionOptions::default()
        },
    )
    .await
    .run(&targets)
    .await
    .unwrap();

    assert_eq!(
        report.outcomes[0].result,
        LookupResult::NotFound {
            reply_id: 2,
            reason: REPLY_TOO_LARGE_CONTENT.to_string(),
        }
    );
    assert!(matches!(
        report.outcomes[1].result,
        LookupResult::Resolved { reply_id: 3, .. }
    ));
    assert_eq!(report.acks_sent, 1);
    assert!(report.ended);

    server.stop().await;
}
