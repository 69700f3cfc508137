use domain::{Oid, RawSample, WireValue};
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::net::UdpSocket;
use ups_protocol::{ProtocolClient, ProtocolError, SnmpClient, SnmpConfig, SnmpVersion};

const NO_SUCH_NAME: i64 = 2;

fn oid(text: &str) -> Oid {
    text.parse().expect("oid")
}

// ---- 假代理用的最小 BER 读写 ----

fn tlv(tag: u8, content: &[u8]) -> Vec<u8> {
    let mut out = vec![tag];
    let len = content.len();
    if len < 0x80 {
        out.push(len as u8);
    } else if len <= 0xff {
        out.extend([0x81, len as u8]);
    } else {
        out.extend([0x82, (len >> 8) as u8, len as u8]);
    }
    out.extend_from_slice(content);
    out
}

fn integer(value: i64) -> Vec<u8> {
    let bytes = value.to_be_bytes();
    let mut start = 0;
    while start < 7
        && ((bytes[start] == 0x00 && bytes[start + 1] & 0x80 == 0)
            || (bytes[start] == 0xff && bytes[start + 1] & 0x80 != 0))
    {
        start += 1;
    }
    tlv(0x02, &bytes[start..])
}

fn unsigned(tag: u8, value: u32) -> Vec<u8> {
    let bytes = u64::from(value).to_be_bytes();
    let mut start = 0;
    while start < 7 && bytes[start] == 0 && bytes[start + 1] & 0x80 == 0 {
        start += 1;
    }
    tlv(tag, &bytes[start..])
}

fn gauge(value: u32) -> Vec<u8> {
    unsigned(0x42, value)
}

fn time_ticks(value: u32) -> Vec<u8> {
    unsigned(0x43, value)
}

fn null() -> Vec<u8> {
    tlv(0x05, &[])
}

fn encode_oid(id: &Oid) -> Vec<u8> {
    let arcs = id.arcs();
    let mut content = Vec::new();
    let first = arcs[0] * 40 + arcs[1];
    for arc in std::iter::once(first).chain(arcs[2..].iter().copied()) {
        let mut chunk = vec![(arc & 0x7f) as u8];
        let mut rest = arc >> 7;
        while rest > 0 {
            chunk.push((rest & 0x7f) as u8 | 0x80);
            rest >>= 7;
        }
        chunk.reverse();
        content.extend(chunk);
    }
    tlv(0x06, &content)
}

fn varbind(name: &[u8], value: &[u8]) -> Vec<u8> {
    tlv(0x30, &[name, value].concat())
}

struct Reader<'a> {
    buf: &'a [u8],
}

impl<'a> Reader<'a> {
    /// 读取下一个 TLV，返回 (tag, 完整编码, 内容)
    fn next(&mut self) -> Option<(u8, &'a [u8], &'a [u8])> {
        let tag = *self.buf.first()?;
        let first = *self.buf.get(1)? as usize;
        let (len, header) = if first < 0x80 {
            (first, 2)
        } else {
            let count = first & 0x7f;
            let bytes = self.buf.get(2..2 + count)?;
            (bytes.iter().fold(0usize, |acc, b| (acc << 8) | *b as usize), 2 + count)
        };
        let whole = self.buf.get(..header + len)?;
        self.buf = &self.buf[header + len..];
        Some((tag, whole, &whole[header..]))
    }

    fn integer(&mut self) -> Option<i64> {
        let (tag, _, content) = self.next()?;
        if tag != 0x02 {
            return None;
        }
        let seed = if content.first()? & 0x80 != 0 { -1 } else { 0 };
        Some(content.iter().fold(seed, |acc, b| (acc << 8) | *b as i64))
    }
}

/// 假代理看到的一次 GET 请求
struct Request {
    version: i64,
    community: Vec<u8>,
    request_id: i64,
    /// 每个 varbind 名称的完整 OID 编码
    names: Vec<Vec<u8>>,
}

impl Request {
    fn parse(bytes: &[u8]) -> Option<Self> {
        let (_, _, message) = Reader { buf: bytes }.next()?;
        let mut message = Reader { buf: message };
        let version = message.integer()?;
        let (_, _, community) = message.next()?;
        let (tag, _, pdu) = message.next()?;
        if tag != 0xa0 {
            return None;
        }
        let mut pdu = Reader { buf: pdu };
        let request_id = pdu.integer()?;
        pdu.integer()?;
        pdu.integer()?;
        let (_, _, list) = pdu.next()?;
        let mut list = Reader { buf: list };
        let mut names = Vec::new();
        while let Some((_, _, pair)) = list.next() {
            let (_, name, _) = Reader { buf: pair }.next()?;
            names.push(name.to_vec());
        }
        Some(Self {
            version,
            community: community.to_vec(),
            request_id,
            names,
        })
    }

    fn position(&self, id: &Oid) -> Option<usize> {
        let encoded = encode_oid(id);
        self.names.iter().position(|name| *name == encoded)
    }

    fn response(&self, error_status: i64, error_index: i64, varbinds: &[Vec<u8>]) -> Vec<u8> {
        let pdu = tlv(
            0xa2,
            &[
                integer(self.request_id),
                integer(error_status),
                integer(error_index),
                tlv(0x30, &varbinds.concat()),
            ]
            .concat(),
        );
        tlv(
            0x30,
            &[integer(self.version), tlv(0x04, &self.community), pdu].concat(),
        )
    }

    /// 对每个请求的 OID 按顺序回填值
    fn answer(&self, value_for: impl Fn(&[u8]) -> Vec<u8>) -> Vec<u8> {
        let varbinds: Vec<Vec<u8>> = self
            .names
            .iter()
            .map(|name| varbind(name, &value_for(name)))
            .collect();
        self.response(0, 0, &varbinds)
    }
}

/// 进程内假代理：每收到一个请求调用一次 `reply`，返回空列表表示不回复。
async fn spawn_agent<F>(reply: F) -> (SocketAddr, Arc<AtomicUsize>)
where
    F: Fn(usize, &Request) -> Vec<Vec<u8>> + Send + 'static,
{
    let socket = UdpSocket::bind("127.0.0.1:0").await.expect("bind agent");
    let addr = socket.local_addr().expect("agent addr");
    let requests = Arc::new(AtomicUsize::new(0));
    let counter = requests.clone();

    tokio::spawn(async move {
        let mut buf = vec![0u8; 65_507];
        loop {
            let Ok((len, from)) = socket.recv_from(&mut buf).await else {
                return;
            };
            let Some(request) = Request::parse(&buf[..len]) else {
                continue;
            };
            let seen = counter.fetch_add(1, Ordering::SeqCst);
            for bytes in reply(seen, &request) {
                let _ = socket.send_to(&bytes, from).await;
            }
        }
    });

    (addr, requests)
}

fn config_for(addr: SocketAddr) -> SnmpConfig {
    let mut config = SnmpConfig::new(addr.ip().to_string());
    config.port = addr.port();
    config.timeout_ms = 200;
    config
}

#[tokio::test]
async fn batched_get_returns_every_varbind() {
    let ids = vec![
        oid(".1.3.6.1.4.1.3808.1.1.1.2.2.2.0"),
        oid(".1.3.6.1.4.1.3808.1.1.4.3.1.0"),
    ];
    let voltage = encode_oid(&ids[0]);
    let (addr, requests) = spawn_agent(move |_, request| {
        assert_eq!(request.community, b"secret".to_vec());
        assert_eq!(request.version, 0);
        vec![request.answer(|name| {
            if name == voltage.as_slice() {
                gauge(240)
            } else {
                integer(2)
            }
        })]
    })
    .await;

    let mut config = config_for(addr);
    config.community = "secret".to_string();

    let mut session = SnmpClient::new().open(&config).await.expect("open");
    let samples = session.get(&ids).await.expect("get");
    session.close();

    assert_eq!(requests.load(Ordering::SeqCst), 1);
    assert_eq!(
        samples,
        vec![
            RawSample::new(ids[0].clone(), WireValue::Gauge(240)),
            RawSample::new(ids[1].clone(), WireValue::Integer(2)),
        ]
    );
}

#[tokio::test]
async fn malformed_varbind_keeps_earlier_samples() {
    let voltage = oid(".1.3.6.1.4.1.3808.1.1.1.2.2.2.0");
    let load = oid(".1.3.6.1.4.1.3808.1.1.1.4.2.3.0");
    let voltage_name = encode_oid(&voltage);
    let load_name = encode_oid(&load);
    let (addr, _) = spawn_agent(move |_, request| {
        // Gauge32 的内容长度 5 且溢出 u32
        let broken = varbind(&load_name, &[0x42, 0x05, 0x01, 0x00, 0x00, 0x00, 0x00]);
        vec![request.response(0, 0, &[varbind(&voltage_name, &gauge(240)), broken])]
    })
    .await;

    let mut session = SnmpClient::new().open(&config_for(addr)).await.expect("open");
    let samples = session
        .get(&[voltage.clone(), load])
        .await
        .expect("malformed varbind must not fail the read");
    session.close();

    assert!(samples.contains(&RawSample::new(voltage, WireValue::Gauge(240))));
}

#[tokio::test]
async fn v1_no_such_name_drops_register_and_retries() {
    let missing = oid(".1.3.6.1.4.1.3808.1.1.4.2.1.0");
    let missing_in_agent = missing.clone();
    let (addr, requests) = spawn_agent(move |_, request| {
        match request.position(&missing_in_agent) {
            Some(index) => {
                let varbinds: Vec<Vec<u8>> = request
                    .names
                    .iter()
                    .map(|name| varbind(name, &null()))
                    .collect();
                vec![request.response(NO_SUCH_NAME, index as i64 + 1, &varbinds)]
            }
            None => vec![request.answer(|_| integer(1))],
        }
    })
    .await;

    let ids = vec![
        oid(".1.3.6.1.4.1.3808.1.1.1.2.1.1.0"),
        missing.clone(),
        oid(".1.3.6.1.4.1.3808.1.1.4.3.1.0"),
    ];
    let mut session = SnmpClient::new().open(&config_for(addr)).await.expect("open");
    let samples = session.get(&ids).await.expect("get");

    assert_eq!(requests.load(Ordering::SeqCst), 2);
    assert_eq!(samples.len(), 2);
    assert!(samples.iter().all(|sample| sample.id != missing));
}

#[tokio::test]
async fn v2c_error_status_is_an_error() {
    let (addr, _) = spawn_agent(|_, request| {
        assert_eq!(request.version, 1);
        vec![request.response(5, 0, &[])]
    })
    .await;

    let mut config = config_for(addr);
    config.version = SnmpVersion::V2c;
    let mut session = SnmpClient::new().open(&config).await.expect("open");
    let result = session.get(&[oid(".1.3.6.1.2.1.33.1.2.1.0")]).await;

    assert!(matches!(result, Err(ProtocolError::Snmp(_))));
}

#[tokio::test]
async fn silent_agent_times_out_after_retries() {
    let (addr, requests) = spawn_agent(|_, _| Vec::new()).await;

    let mut config = config_for(addr);
    config.timeout_ms = 100;
    config.retries = 1;
    let mut session = SnmpClient::new().open(&config).await.expect("open");
    let result = session.get(&[oid(".1.3.6.1.2.1.33.1.2.1.0")]).await;

    assert!(matches!(result, Err(ProtocolError::Timeout(_))));
    assert_eq!(requests.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn retransmit_after_lost_reply() {
    let (addr, requests) = spawn_agent(|seen, request| {
        if seen == 0 {
            Vec::new()
        } else {
            vec![request.answer(|_| time_ticks(1_200_000))]
        }
    })
    .await;

    let mut config = config_for(addr);
    config.timeout_ms = 100;
    config.retries = 1;
    let mut session = SnmpClient::new().open(&config).await.expect("open");
    let samples = session
        .get(&[oid(".1.3.6.1.4.1.3808.1.1.1.2.2.4.0")])
        .await
        .expect("get");

    assert_eq!(requests.load(Ordering::SeqCst), 2);
    assert_eq!(samples[0].value, WireValue::TimeTicks(1_200_000));
}

#[tokio::test]
async fn empty_request_skips_network() {
    let (addr, requests) = spawn_agent(|_, _| Vec::new()).await;
    let mut session = SnmpClient::new().open(&config_for(addr)).await.expect("open");
    assert!(session.get(&[]).await.expect("get").is_empty());
    assert_eq!(requests.load(Ordering::SeqCst), 0);
}

#[test]
fn parse_config_defaults() {
    let config = SnmpConfig::from_json(r#"{"host": "192.168.1.50"}"#).expect("config");
    assert_eq!(config.port, 161);
    assert_eq!(config.community, "public");
    assert_eq!(config.version, SnmpVersion::V1);
    assert_eq!(config.timeout_ms, 2000);
    assert_eq!(config.retries, 0);

    let config =
        SnmpConfig::from_json(r#"{"host": "ups", "version": "2c", "retries": 1}"#).expect("config");
    assert_eq!(config.version, SnmpVersion::V2c);
    assert_eq!(config.retries, 1);

    assert!(SnmpConfig::from_json(r#"{"port": 161}"#).is_err());
}

#[test]
fn parse_version() {
    assert_eq!("1".parse::<SnmpVersion>().unwrap(), SnmpVersion::V1);
    assert_eq!("2C".parse::<SnmpVersion>().unwrap(), SnmpVersion::V2c);
    assert!("3".parse::<SnmpVersion>().is_err());
    assert_eq!(SnmpVersion::default(), SnmpVersion::V1);
}
