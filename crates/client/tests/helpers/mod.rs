#![allow(dead_code)]
//! In-process mock nameservers and record builders for the client tests.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use hickory_proto::op::{Message, MessageType, OpCode, ResponseCode};
use hickory_proto::rr::rdata::{MX, NS, SOA};
use hickory_proto::rr::{Name, RData, Record};
use kestrel_dns_client::{Resolver, ResolverConfig};
use std::str::FromStr;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream, UdpSocket};

pub fn name(s: &str) -> Name {
    Name::from_str(s).unwrap()
}

pub fn a_record(owner: &str, octets: [u8; 4], ttl: u32) -> Record {
    Record::from_rdata(
        name(owner),
        ttl,
        RData::A(std::net::Ipv4Addr::from(octets).into()),
    )
}

pub fn ns_record(owner: &str, target: &str, ttl: u32) -> Record {
    Record::from_rdata(name(owner), ttl, RData::NS(NS(name(target))))
}

pub fn mx_record(owner: &str, preference: u16, exchange: &str, ttl: u32) -> Record {
    Record::from_rdata(name(owner), ttl, RData::MX(MX::new(preference, name(exchange))))
}

pub fn soa_record(owner: &str, serial: u32) -> Record {
    let soa = SOA::new(
        name(&format!("ns1.{owner}")),
        name(&format!("hostmaster.{owner}")),
        serial,
        7200,
        3600,
        1209600,
        86400,
    );
    Record::from_rdata(name(owner), 3600, RData::SOA(soa))
}

/// Response echoing the request's ID and question.
pub fn response_for(request: &Message, rcode: ResponseCode, answers: Vec<Record>) -> Message {
    let mut response = Message::new(request.id(), MessageType::Response, OpCode::Query);
    response.set_response_code(rcode);
    response.set_recursion_available(true);
    if let Some(query) = request.queries().first() {
        response.add_query(query.clone());
    }
    for record in answers {
        response.add_answer(record);
    }
    response
}

/// Resolver pointed at a single mock server, with timeouts tight enough for
/// tests.
pub async fn resolver_for(addr: SocketAddr) -> Resolver {
    let config = ResolverConfig {
        nameservers: Some(addr.ip().to_string().into()),
        port: addr.port(),
        query_timeout: 250,
        ..ResolverConfig::default()
    };
    Resolver::new(config).await.unwrap()
}

/// A nameserver that swallows every datagram, counting them.
pub async fn silent_udp_server() -> (SocketAddr, Arc<AtomicUsize>) {
    let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let addr = socket.local_addr().unwrap();
    let counter = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&counter);
    tokio::spawn(async move {
        let mut buf = vec![0u8; 4096];
        while socket.recv_from(&mut buf).await.is_ok() {
            seen.fetch_add(1, Ordering::SeqCst);
        }
    });
    (addr, counter)
}

/// A nameserver that answers every query with the given records.
pub async fn answering_udp_server(answers: Vec<Record>) -> SocketAddr {
    answering_udp_server_at("127.0.0.1:0", answers).await
}

/// Same, bound to a specific address. Tests exercising nameserver
/// precedence bind several loopback addresses on one shared port.
pub async fn answering_udp_server_at(bind: &str, answers: Vec<Record>) -> SocketAddr {
    let socket = UdpSocket::bind(bind).await.unwrap();
    let addr = socket.local_addr().unwrap();
    tokio::spawn(async move {
        let mut buf = vec![0u8; 4096];
        loop {
            let Ok((len, peer)) = socket.recv_from(&mut buf).await else {
                return;
            };
            let Ok(request) = Message::from_vec(&buf[..len]) else {
                continue;
            };
            let response = response_for(&request, ResponseCode::NoError, answers.clone());
            let _ = socket.send_to(&response.to_vec().unwrap(), peer).await;
        }
    });
    addr
}

/// Truncates over UDP and serves the full answer on TCP at the same port.
pub async fn truncating_server(full_answers: Vec<Record>) -> SocketAddr {
    let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let addr = socket.local_addr().unwrap();
    let listener = TcpListener::bind(addr).await.unwrap();

    tokio::spawn(async move {
        let mut buf = vec![0u8; 4096];
        loop {
            let Ok((len, peer)) = socket.recv_from(&mut buf).await else {
                return;
            };
            let Ok(request) = Message::from_vec(&buf[..len]) else {
                continue;
            };
            let mut response = response_for(&request, ResponseCode::NoError, Vec::new());
            response.set_truncated(true);
            let _ = socket.send_to(&response.to_vec().unwrap(), peer).await;
        }
    });

    let answers = full_answers;
    tokio::spawn(async move {
        loop {
            let Ok((mut stream, _)) = listener.accept().await else {
                return;
            };
            let Some(request) = read_framed(&mut stream).await else {
                continue;
            };
            let Ok(request) = Message::from_vec(&request) else {
                continue;
            };
            let response = response_for(&request, ResponseCode::NoError, answers.clone());
            let _ = write_framed(&mut stream, &response.to_vec().unwrap()).await;
        }
    });

    addr
}

/// One-shot AXFR server. Sends the zone in the given message-sized chunks,
/// pausing `inter_message_delay` before every chunk after the first.
pub async fn axfr_server(
    chunks: Vec<Vec<Record>>,
    rcode: ResponseCode,
    inter_message_delay: Duration,
) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let Ok((mut stream, _)) = listener.accept().await else {
            return;
        };
        let Some(request) = read_framed(&mut stream).await else {
            return;
        };
        let Ok(request) = Message::from_vec(&request) else {
            return;
        };

        if rcode != ResponseCode::NoError {
            let response = response_for(&request, rcode, Vec::new());
            let _ = write_framed(&mut stream, &response.to_vec().unwrap()).await;
            return;
        }

        let mut first = true;
        for chunk in chunks {
            if !first {
                tokio::time::sleep(inter_message_delay).await;
            }
            first = false;
            let response = response_for(&request, ResponseCode::NoError, chunk);
            if write_framed(&mut stream, &response.to_vec().unwrap())
                .await
                .is_err()
            {
                return;
            }
        }
    });

    addr
}

async fn write_framed(stream: &mut TcpStream, payload: &[u8]) -> std::io::Result<()> {
    let len = payload.len() as u16;
    stream.write_all(&len.to_be_bytes()).await?;
    stream.write_all(payload).await?;
    Ok(())
}

async fn read_framed(stream: &mut TcpStream) -> Option<Vec<u8>> {
    let mut len_buf = [0u8; 2];
    stream.read_exact(&mut len_buf).await.ok()?;
    let len = u16::from_be_bytes(len_buf) as usize;
    let mut buf = vec![0u8; len];
    stream.read_exact(&mut buf).await.ok()?;
    Some(buf)
}
