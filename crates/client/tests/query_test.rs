use std::sync::atomic::Ordering;
use std::time::{Duration, Instant};

use kestrel_dns_client::{DnsError, Resolver, ResolverConfig};

mod helpers;
use helpers::{
    a_record, answering_udp_server, answering_udp_server_at, resolver_for, silent_udp_server,
    truncating_server,
};

#[tokio::test]
async fn test_unknown_type_is_rejected_before_any_network() {
    let (addr, counter) = silent_udp_server().await;
    let resolver = resolver_for(addr).await;

    let err = resolver
        .query("example.com", "NOTAREALTYPE")
        .await
        .unwrap_err();
    assert!(matches!(err, DnsError::UnknownRecordType(_)));
    assert_eq!(counter.load(Ordering::SeqCst), 0, "a datagram was sent");
}

#[tokio::test]
async fn test_unknown_class_is_rejected_before_any_network() {
    let (addr, counter) = silent_udp_server().await;
    let resolver = resolver_for(addr).await;

    let err = resolver
        .query_with("example.com", "A", "INTERNET", 1)
        .await
        .unwrap_err();
    assert!(matches!(err, DnsError::UnknownRecordClass(_)));
    assert_eq!(counter.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_query_decodes_an_answer() {
    let addr = answering_udp_server(vec![a_record("example.com.", [192, 0, 2, 80], 120)]).await;
    let resolver = resolver_for(addr).await;

    let packet = resolver.query("example.com", "A").await.unwrap().unwrap();
    assert_eq!(packet.rcode(), "NOERROR");
    assert_eq!(packet.opcode(), "QUERY");

    let answers = packet.answer();
    assert_eq!(answers.len(), 1);
    assert_eq!(answers[0].owner(), "example.com.");
    assert_eq!(answers[0].ttl(), 120);
    assert_eq!(answers[0].ip(), "192.0.2.80");
}

#[tokio::test]
async fn test_first_nameserver_takes_precedence() {
    // Two loopback addresses share one port so the resolver can tell the
    // servers apart purely by nameserver order.
    let primary = answering_udp_server(vec![a_record("example.com.", [192, 0, 2, 1], 60)]).await;
    let secondary = answering_udp_server_at(
        &format!("127.0.0.2:{}", primary.port()),
        vec![a_record("example.com.", [192, 0, 2, 2], 60)],
    )
    .await;

    let config = ResolverConfig {
        nameservers: Some(
            vec![primary.ip().to_string(), secondary.ip().to_string()].into(),
        ),
        port: primary.port(),
        query_timeout: 250,
        ..ResolverConfig::default()
    };
    let resolver = Resolver::new(config).await.unwrap();

    let packet = resolver.query("example.com", "A").await.unwrap().unwrap();
    assert_eq!(packet.answer()[0].ip(), "192.0.2.1");
}

#[tokio::test]
async fn test_unresponsive_nameserver_falls_through_in_order() {
    let answering = answering_udp_server(vec![a_record("example.com.", [192, 0, 2, 9], 60)]).await;

    // Nothing listens on 127.0.0.9 at that port; the resolver should wait
    // it out and move on to the second entry within the same attempt.
    let config = ResolverConfig {
        nameservers: Some(vec!["127.0.0.9".to_string(), answering.ip().to_string()].into()),
        port: answering.port(),
        query_timeout: 200,
        ..ResolverConfig::default()
    };
    let resolver = Resolver::new(config).await.unwrap();

    let packet = resolver.query("example.com", "A").await.unwrap().unwrap();
    assert_eq!(packet.answer()[0].ip(), "192.0.2.9");
}

#[tokio::test]
async fn test_retry_exhaustion_is_not_an_error() {
    let (addr, counter) = silent_udp_server().await;
    let config = ResolverConfig {
        nameservers: Some(addr.ip().to_string().into()),
        port: addr.port(),
        query_timeout: 100,
        retry_delay: 1000,
        ..ResolverConfig::default()
    };
    let resolver = Resolver::new(config).await.unwrap();

    let started = Instant::now();
    let result = resolver
        .query_with("example.com", "A", "IN", 3)
        .await
        .unwrap();
    let elapsed = started.elapsed();

    assert!(result.is_none(), "exhausted retries must yield no result");
    assert!(
        elapsed >= Duration::from_millis(2000),
        "attempts were not separated by the retry delay: {elapsed:?}"
    );

    // Give the last datagram a moment to land on the mock side.
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(counter.load(Ordering::SeqCst), 3, "expected exactly 3 attempts");
}

#[tokio::test]
async fn test_truncated_response_falls_back_to_tcp() {
    let addr = truncating_server(vec![a_record("big.example.com.", [198, 51, 100, 9], 30)]).await;
    let resolver = resolver_for(addr).await;

    let packet = resolver
        .query("big.example.com", "A")
        .await
        .unwrap()
        .unwrap();
    // The TCP answer, not the truncated UDP one.
    assert!(!packet.flags().contains(&"TC".to_string()));
    assert_eq!(packet.answer()[0].ip(), "198.51.100.9");
}
