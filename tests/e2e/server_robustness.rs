mod common;

use common::{example_records, RawClient, TestServer};
use ferrous_lookup_domain::{LookupTarget, Message, MessageType};
use std::time::Duration;

const QUIET: Duration = Duration::from_millis(200);

#[tokio::test]
async fn test_undecodable_datagram_gets_no_reply_and_server_stays_up() {
    let server = TestServer::start(example_records()).await;
    let client = RawClient::connect(server.addr).await;

    client.send_raw(b"\x00\x01garbage").await;
    assert!(client.try_recv(QUIET).await.is_none());

    client.send_raw(br#"{"id":1,"type":"Goodbye","content":"x"}"#).await;
    assert!(client.try_recv(QUIET).await.is_none());

    client
        .send_raw(br#"{"id":1,"type":"DNSLookupReply","content":"Domain not found"}"#)
        .await;
    assert!(client.try_recv(QUIET).await.is_none());

    client.send(&Message::hello(7)).await;
    let welcome = client.recv().await;
    assert_eq!(welcome.msg_type, MessageType::Welcome);
    assert_eq!(welcome.id, 7);

    server.stop().await;
}

#[tokio::test]
async fn test_server_never_answers_server_side_messages() {
    let server = TestServer::start(example_records()).await;
    let client = RawClient::connect(server.addr).await;

    client.send(&Message::welcome(1)).await;
    client.send(&Message::not_found(2)).await;
    client.send(&Message::ack(99)).await;
    assert!(client.try_recv(QUIET).await.is_none());

    server.stop().await;
}

#[tokio::test]
async fn test_legacy_field_names_are_understood() {
    let server = TestServer::start(example_records()).await;
    let client = RawClient::connect(server.addr).await;

    client
        .send_raw(br#"{"MsgId":5,"MsgType":"DNSLookup","Content":"example.com"}"#)
        .await;
    let reply = client.recv().await;

    assert_eq!(reply.msg_type, MessageType::DNSLookupReply);
    assert_eq!(reply.id, 5);

    server.stop().await;
}

#[tokio::test]
async fn test_endpoint_state_is_per_client() {
    let server = TestServer::start(example_records()).await;
    let first = RawClient::connect(server.addr).await;
    let second = RawClient::connect(server.addr).await;

    first.send(&Message::hello(1)).await;
    first.recv().await;
    second
        .send(&Message::lookup(1, LookupTarget::Name("example.com".to_string())))
        .await;
    second.recv().await;
    assert_eq!(server.tracker.len(), 2);

    first.send(&Message::client_end(2)).await;
    assert_eq!(first.recv().await.msg_type, MessageType::End);
    assert_eq!(server.tracker.len(), 1);

    let second_addr = second.socket.local_addr().unwrap();
    assert_eq!(
        server.tracker.get(second_addr).unwrap().pending_reply,
        Some(1)
    );

    server.stop().await;
}

#[tokio::test]
async fn test_shutdown_stops_receive_loop() {
    let server = TestServer::start(Vec::new()).await;
    server.stop().await;
}
