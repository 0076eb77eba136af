//! UDP and TCP exchange primitives. TCP messages carry the two-byte
//! length prefix of RFC 1035 §4.2.2.

use std::io;
use std::net::SocketAddr;
use std::time::Duration;

use kestrel_dns_domain::DnsError;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpStream, UdpSocket};
use tokio::time::timeout;
use tracing::debug;

/// Large enough for any response fitting our EDNS advertisement.
const UDP_RECV_SIZE: usize = 4096;

/// Send one query datagram and wait up to `wait` for the reply.
pub(crate) async fn udp_exchange(
    server: SocketAddr,
    request: &[u8],
    wait: Duration,
) -> Result<Vec<u8>, DnsError> {
    let bind = if server.is_ipv6() { "[::]:0" } else { "0.0.0.0:0" };
    let socket = UdpSocket::bind(bind)
        .await
        .map_err(|e| DnsError::Io(e.to_string()))?;

    socket
        .send_to(request, server)
        .await
        .map_err(|e| DnsError::Io(e.to_string()))?;

    let exchange = async {
        let mut buf = vec![0u8; UDP_RECV_SIZE];
        loop {
            let (len, peer) = socket.recv_from(&mut buf).await?;
            if peer == server {
                return io::Result::Ok(buf[..len].to_vec());
            }
            debug!(peer = %peer, "discarding datagram from unexpected peer");
        }
    };

    match timeout(wait, exchange).await {
        Ok(Ok(bytes)) => {
            debug!(server = %server, len = bytes.len(), "udp response received");
            Ok(bytes)
        }
        Ok(Err(e)) => Err(DnsError::Io(e.to_string())),
        Err(_) => Err(DnsError::TransportTimeout {
            server: server.to_string(),
        }),
    }
}

/// One-shot TCP exchange: connect, send a framed query, read one framed
/// response. Used when a UDP response comes back truncated.
pub(crate) async fn tcp_exchange(
    server: SocketAddr,
    request: &[u8],
    wait: Duration,
) -> Result<Vec<u8>, DnsError> {
    let exchange = async {
        let mut stream = TcpStream::connect(server).await?;
        write_framed(&mut stream, request).await?;
        read_framed(&mut stream).await?.ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "connection closed before response",
            )
        })
    };

    match timeout(wait, exchange).await {
        Ok(Ok(bytes)) => {
            debug!(server = %server, len = bytes.len(), "tcp response received");
            Ok(bytes)
        }
        Ok(Err(e)) => Err(DnsError::Io(e.to_string())),
        Err(_) => Err(DnsError::TransportTimeout {
            server: server.to_string(),
        }),
    }
}

pub(crate) async fn write_framed(stream: &mut TcpStream, payload: &[u8]) -> io::Result<()> {
    let len = u16::try_from(payload.len())
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "message exceeds 64 KiB"))?;
    stream.write_all(&len.to_be_bytes()).await?;
    stream.write_all(payload).await?;
    Ok(())
}

/// Read one length-prefixed message. `None` means the peer closed the
/// connection cleanly between messages.
pub(crate) async fn read_framed(stream: &mut TcpStream) -> io::Result<Option<Vec<u8>>> {
    let mut len_buf = [0u8; 2];
    match stream.read_exact(&mut len_buf).await {
        Ok(_) => {}
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => return Ok(None),
        Err(e) => return Err(e),
    }

    let len = u16::from_be_bytes(len_buf) as usize;
    let mut buf = vec![0u8; len];
    stream.read_exact(&mut buf).await?;
    Ok(Some(buf))
}
