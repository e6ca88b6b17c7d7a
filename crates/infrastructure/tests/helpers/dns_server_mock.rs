#![allow(dead_code)]
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, UdpSocket};
use tokio::sync::oneshot;

/// How the mock answers every PTR query it receives.
#[derive(Debug, Clone)]
pub enum MockAnswer {
    Ptr(String),
    NxDomain,
    NoData,
    ServFail,
    Refused,
    /// TC bit over UDP; the full PTR answer only over TCP.
    Truncated(String),
    /// Bytes that do not parse as a DNS message.
    Garbage,
    /// A well-formed answer carrying the wrong message ID.
    WrongId(String),
    /// Never replies.
    Silent,
}

/// UDP + TCP DNS server on 127.0.0.1 with an ephemeral port.
pub struct MockDnsServer {
    addr: SocketAddr,
    udp_queries: Arc<AtomicUsize>,
    tcp_queries: Arc<AtomicUsize>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn start(answer: MockAnswer) -> Result<Self, std::io::Error> {
        let socket = UdpSocket::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = socket.local_addr()?;
        let listener = TcpListener::bind(addr).await?;

        let udp_queries = Arc::new(AtomicUsize::new(0));
        let tcp_queries = Arc::new(AtomicUsize::new(0));
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        let udp_count = Arc::clone(&udp_queries);
        let tcp_count = Arc::clone(&tcp_queries);

        tokio::spawn(async move {
            let mut buf = vec![0u8; 512];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            udp_count.fetch_add(1, Ordering::SeqCst);
                            if let Some(response) = build_response(&buf[..len], &answer, false) {
                                let _ = socket.send_to(&response, peer).await;
                            }
                        }
                    }
                    accepted = listener.accept() => {
                        if let Ok((stream, _)) = accepted {
                            let answer = answer.clone();
                            let tcp_count = Arc::clone(&tcp_count);
                            tokio::spawn(async move {
                                let _ = serve_tcp(stream, &answer, &tcp_count).await;
                            });
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            udp_queries,
            tcp_queries,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Resolver string for this server over UDP.
    pub fn resolver(&self) -> String {
        self.addr.to_string()
    }

    pub fn tcp_resolver(&self) -> String {
        format!("tcp://{}", self.addr)
    }

    pub fn udp_queries(&self) -> usize {
        self.udp_queries.load(Ordering::SeqCst)
    }

    pub fn tcp_queries(&self) -> usize {
        self.tcp_queries.load(Ordering::SeqCst)
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

async fn serve_tcp(
    mut stream: tokio::net::TcpStream,
    answer: &MockAnswer,
    count: &AtomicUsize,
) -> std::io::Result<()> {
    let mut len_buf = [0u8; 2];
    stream.read_exact(&mut len_buf).await?;
    let mut query = vec![0u8; u16::from_be_bytes(len_buf) as usize];
    stream.read_exact(&mut query).await?;
    count.fetch_add(1, Ordering::SeqCst);

    if let Some(response) = build_response(&query, answer, true) {
        stream
            .write_all(&(response.len() as u16).to_be_bytes())
            .await?;
        stream.write_all(&response).await?;
        stream.flush().await?;
    }
    Ok(())
}

fn encode_name(name: &str) -> Vec<u8> {
    let mut out = Vec::new();
    for label in name.trim_end_matches('.').split('.') {
        out.push(label.len() as u8);
        out.extend_from_slice(label.as_bytes());
    }
    out.push(0);
    out
}

/// Builds the raw response, echoing the question section of `query`.
pub fn build_response(query: &[u8], answer: &MockAnswer, over_tcp: bool) -> Option<Vec<u8>> {
    if query.len() < 12 {
        return None;
    }

    let (rcode, hostname, truncated) = match answer {
        MockAnswer::Silent => return None,
        MockAnswer::Garbage => return Some(vec![0xde, 0xad, 0xbe]),
        MockAnswer::Ptr(h) | MockAnswer::WrongId(h) => (0u8, Some(h.as_str()), false),
        MockAnswer::NxDomain => (3, None, false),
        MockAnswer::NoData => (0, None, false),
        MockAnswer::ServFail => (2, None, false),
        MockAnswer::Refused => (5, None, false),
        MockAnswer::Truncated(h) if over_tcp => (0, Some(h.as_str()), false),
        MockAnswer::Truncated(_) => (0, None, true),
    };

    let mut response = Vec::with_capacity(512);

    match answer {
        MockAnswer::WrongId(_) => {
            response.push(query[0] ^ 0xff);
            response.push(query[1] ^ 0xff);
        }
        _ => response.extend_from_slice(&query[0..2]),
    }

    // QR + RD, TC when truncated
    let flags = if truncated { 0x83 } else { 0x81 };
    response.push(flags);
    // RA + rcode
    response.push(0x80 | rcode);

    response.extend_from_slice(&query[4..6]);
    response.extend_from_slice(&[0x00, if hostname.is_some() { 0x01 } else { 0x00 }]);
    response.extend_from_slice(&[0x00, 0x00]);
    response.extend_from_slice(&[0x00, 0x00]);

    response.extend_from_slice(&query[12..]);

    if let Some(hostname) = hostname {
        let rdata = encode_name(hostname);
        response.extend_from_slice(&[
            0xc0, 0x0c, // pointer to the question name
            0x00, 0x0c, // PTR
            0x00, 0x01, // IN
            0x00, 0x00, 0x00, 0x3c, // TTL 60
        ]);
        response.extend_from_slice(&(rdata.len() as u16).to_be_bytes());
        response.extend_from_slice(&rdata);
    }

    Some(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_echoes_id_and_sets_qr() {
        let query = vec![
            0xab, 0xcd, 0x01, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        ];
        let response = build_response(&query, &MockAnswer::NxDomain, false).unwrap();

        assert_eq!(&response[0..2], &[0xab, 0xcd]);
        assert_eq!(response[2] & 0x80, 0x80);
        assert_eq!(response[3] & 0x0f, 3);
    }
}
