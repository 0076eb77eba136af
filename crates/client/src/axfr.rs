//! Zone transfer (AXFR) as a pull-based record stream.
//!
//! A transfer opens with the zone's SOA and closes with a repeat of it,
//! possibly spread over many TCP messages. Records are surfaced one at a
//! time as they are pulled; only the message currently being drained is
//! held in memory, so a caller can walk a very large zone, or stop after
//! the first few records, without paying for the rest. Dropping the
//! transfer closes the connection.

use std::collections::VecDeque;
use std::net::SocketAddr;

use futures::Stream;
use hickory_proto::op::{Message, ResponseCode};
use hickory_proto::rr::RecordType as WireType;
use kestrel_dns_domain::{DnsError, RecordClass, RecordType};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::packet::rcode_name;
use crate::record::ResourceRecord;
use crate::resolver::Resolver;
use crate::{message, transport};

/// An in-progress zone transfer. Finite and not restartable: a fresh call
/// to [`Resolver::axfr`] is required to redo the transfer.
pub struct ZoneTransfer {
    stream: TcpStream,
    pending: VecDeque<ResourceRecord>,
    id: u16,
    soa_seen: u8,
    finished: bool,
}

impl ZoneTransfer {
    pub(crate) async fn start(resolver: &Resolver, name: &str) -> Result<Self, DnsError> {
        let (id, request) =
            message::build_query(name, RecordType::AXFR, RecordClass::IN, resolver.dnssec())?;

        let mut stream = None;
        for addr in resolver.nameserver_addrs() {
            let server = SocketAddr::new(*addr, resolver.port());
            match timeout(resolver.query_timeout(), TcpStream::connect(server)).await {
                Ok(Ok(conn)) => {
                    debug!(server = %server, zone = name, "zone transfer session opened");
                    stream = Some(conn);
                    break;
                }
                Ok(Err(e)) => warn!(server = %server, error = %e, "zone transfer connect failed"),
                Err(_) => warn!(server = %server, "zone transfer connect timed out"),
            }
        }
        let Some(mut stream) = stream else {
            return Err(DnsError::AxfrStartFailed(
                "no configured nameserver accepted the connection".to_string(),
            ));
        };

        transport::write_framed(&mut stream, &request)
            .await
            .map_err(|e| DnsError::AxfrStartFailed(e.to_string()))?;

        let first = transport::read_framed(&mut stream)
            .await
            .map_err(|e| DnsError::AxfrStartFailed(e.to_string()))?
            .ok_or_else(|| {
                DnsError::AxfrStartFailed("connection closed before the first response".to_string())
            })?;
        let first = Message::from_vec(&first)
            .map_err(|e| DnsError::AxfrStartFailed(format!("undecodable response: {e}")))?;

        if first.id() != id {
            return Err(DnsError::AxfrStartFailed("response ID mismatch".to_string()));
        }
        if first.response_code() != ResponseCode::NoError {
            return Err(DnsError::AxfrStartFailed(rcode_name(first.response_code())));
        }
        let answers = first.answers();
        if answers.is_empty() {
            return Err(DnsError::AxfrStartFailed(
                "first response carried no records".to_string(),
            ));
        }
        if answers[0].record_type() != WireType::SOA {
            return Err(DnsError::AxfrStartFailed(
                "transfer did not begin with SOA".to_string(),
            ));
        }

        let mut transfer = Self {
            stream,
            pending: VecDeque::new(),
            id,
            soa_seen: 0,
            finished: false,
        };
        transfer.enqueue(&first);
        Ok(transfer)
    }

    /// Pull the next record, reading further messages off the wire only when
    /// the current one is drained. `Ok(None)` marks the end of the zone and
    /// keeps being returned afterwards.
    pub async fn next_record(&mut self) -> Result<Option<ResourceRecord>, DnsError> {
        loop {
            if let Some(record) = self.pending.pop_front() {
                return Ok(Some(record));
            }
            if self.finished {
                return Ok(None);
            }

            match transport::read_framed(&mut self.stream)
                .await
                .map_err(|e| DnsError::Io(e.to_string()))?
            {
                None => {
                    debug!("zone transfer connection closed");
                    self.finished = true;
                }
                Some(bytes) => {
                    let message = Message::from_vec(&bytes)
                        .map_err(|e| DnsError::Proto(format!("undecodable response: {e}")))?;
                    if message.id() != self.id {
                        return Err(DnsError::Proto("response ID mismatch".to_string()));
                    }
                    if message.response_code() != ResponseCode::NoError {
                        return Err(DnsError::Proto(format!(
                            "zone transfer aborted with {}",
                            rcode_name(message.response_code())
                        )));
                    }
                    self.enqueue(&message);
                }
            }
        }
    }

    /// Adapt the puller into a `futures::Stream` ending at the closing SOA.
    pub fn into_stream(self) -> impl Stream<Item = Result<ResourceRecord, DnsError>> {
        futures::stream::unfold(Some(self), |state| async move {
            let mut transfer = state?;
            match transfer.next_record().await {
                Ok(Some(record)) => Some((Ok(record), Some(transfer))),
                Ok(None) => None,
                Err(e) => Some((Err(e), None)),
            }
        })
    }

    /// Queue one message's answer records. The second SOA closes the
    /// transfer; it is still yielded, anything after it is ignored.
    fn enqueue(&mut self, message: &Message) {
        for record in message.answers() {
            if self.finished {
                break;
            }
            let is_soa = record.record_type() == WireType::SOA;
            self.pending.push_back(ResourceRecord::from_record(record));
            if is_soa {
                self.soa_seen += 1;
                if self.soa_seen >= 2 {
                    self.finished = true;
                }
            }
        }
    }
}
