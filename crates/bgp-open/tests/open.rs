use std::net::Ipv4Addr;

use bgp_open::*;
use hex_literal::hex;

const MP_BODY: &[u8] = &hex!(
    "04"       // Version
    "00c8"     // My AS: 200
    "003c"     // Hold time: 60
    "0a000001" // BGP Identifier: 10.0.0.1
    "08"       // Opt Parm Len
    "02 06"    // Capabilities, length 6
    "01 04 00 01 00 01" // Multiprotocol IPv4/Unicast
);

fn full_open() -> OpenMessage {
    let v4 = AfiSafi::new(Afi::Ip, Safi::Unicast);
    let v6 = AfiSafi::new(Afi::Ip6, Safi::Unicast);
    let vpn = AfiSafi::new(Afi::Ip, Safi::MplsVpn);

    let mut open = OpenMessage::new(4_200_000_000, 180, Ipv4Addr::new(192, 0, 2, 254));
    let caps = &mut open.capabilities;
    caps.afi_safi = vec![v4, v6, vpn];
    caps.route_refresh = true;
    caps.enhanced_route_refresh = true;
    caps.four_octet_as = true;
    caps.graceful_restart = Some(CapRestart {
        restart_state: true,
        notification: true,
        restart_time: 120,
        values: vec![RestartValue::new(v4, true), RestartValue::new(v6, false)],
    });
    caps.add_path = vec![
        AddPathValue::new(v4, AddPathSendReceive::SendReceive),
        AddPathValue::new(v6, AddPathSendReceive::Receive),
    ];
    caps.llgr = vec![LlgrValue {
        afi_safi: v4,
        forwarding: true,
        stale_time: 86400,
    }];
    caps.vendor.insert(VendorCap::RouteRefreshCisco);
    caps.vendor.insert(VendorCap::MultisessionCisco);
    open
}

#[test]
pub fn decode_multiprotocol_test() {
    let open = decode_open_body(MP_BODY).unwrap();
    assert_eq!(open.version, 4);
    assert_eq!(open.asn, 200);
    assert_eq!(open.hold_time, 60);
    assert_eq!(open.bgp_identifier.to_string(), "10.0.0.1");
    assert_eq!(
        open.capabilities.afi_safi,
        vec![AfiSafi::new(Afi::Ip, Safi::Unicast)]
    );
    assert!(!open.capabilities.four_octet_as);
    assert!(open.unrecognized_parameters.is_empty());
}

#[test]
pub fn construct_four_octet_as_test() {
    let mut open = OpenMessage::new(70000, 90, Ipv4Addr::new(192, 0, 2, 1));
    open.capabilities.four_octet_as = true;
    open.capabilities.route_refresh = true;

    const EXPECTED: &[u8] = &hex!(
        "ffffffffffffffffffffffffffffffff" // Marker
        "0027"     // Length: 39
        "01"       // Type: Open
        "04"       // Version
        "5ba0"     // My AS: AS_TRANS
        "005a"     // Hold time: 90
        "c0000201" // BGP Identifier: 192.0.2.1
        "0a"       // Opt Parm Len
        "02 08"    // Capabilities, length 8
        "02 00"    // Route Refresh
        "41 04 00 01 11 70" // 4 Octet AS: 70000
    );
    let buf = encode_open_message(&open).unwrap();
    assert_eq!(&buf[..], EXPECTED);

    let length = u16::from_be_bytes([buf[16], buf[17]]) as usize;
    assert_eq!(length, BGP_HEADER_LEN as usize + encode_open_body(&open).unwrap().len());

    let decoded = decode_open_body(&buf[BGP_HEADER_LEN as usize..]).unwrap();
    assert_eq!(decoded, open);
}

#[test]
pub fn round_trip_test() {
    let open = full_open();
    let body = encode_open_body(&open).unwrap();
    let decoded = decode_open_body(&body).unwrap();
    assert_eq!(decoded, open);

    let mut open = OpenMessage::new(65001, 0, Ipv4Addr::new(10, 1, 1, 1));
    open.capabilities.afi_safi = vec![AfiSafi::new(Afi::L2vpn, Safi::Evpn)];
    let body = encode_open_body(&open).unwrap();
    assert_eq!(decode_open_body(&body).unwrap(), open);

    let open = OpenMessage::new(65001, 90, Ipv4Addr::new(10, 1, 1, 1));
    let body = encode_open_body(&open).unwrap();
    assert_eq!(body.len(), 10);
    assert_eq!(body[9], 0);
    assert_eq!(decode_open_body(&body).unwrap(), open);
}

#[test]
pub fn small_asn_with_four_octet_test() {
    let mut open = OpenMessage::new(65001, 90, Ipv4Addr::new(10, 1, 1, 1));
    open.capabilities.four_octet_as = true;
    let body = encode_open_body(&open).unwrap();
    assert_eq!(&body[1..3], &[0xfd, 0xe9]);
    assert_eq!(decode_open_body(&body).unwrap(), open);
}

#[test]
pub fn multiprotocol_aggregation_test() {
    const SEPARATE: &[u8] = &hex!(
        "04 fde8 00b4 c0000201 10"
        "02 06 01 04 00 02 00 01" // IPv6/Unicast
        "02 06 01 04 00 01 00 01" // IPv4/Unicast
    );
    const PACKED: &[u8] = &hex!(
        "04 fde8 00b4 c0000201 0e"
        "02 0c 01 04 00 02 00 01 01 04 00 01 00 01"
    );
    let expected = vec![
        AfiSafi::new(Afi::Ip6, Safi::Unicast),
        AfiSafi::new(Afi::Ip, Safi::Unicast),
    ];
    for body in [SEPARATE, PACKED] {
        let open = decode_open_body(body).unwrap();
        assert_eq!(open.capabilities.afi_safi, expected);
    }
}

#[test]
pub fn unrecognized_idempotence_test() {
    const BODY: &[u8] = &hex!(
        "04 fde8 00b4 c0000201 16"
        "02 0f"
        "01 04 00 01 00 01"     // Multiprotocol IPv4/Unicast
        "02 00"                 // Route Refresh
        "49 05 03 61 62 63 00"  // Code 73, not registered
        "09 03 aa bb cc"        // Parameter type 9, not registered
    );
    let open = decode_open_body(BODY).unwrap();
    assert_eq!(
        open.capabilities.unrecognized.get(&73),
        Some(&vec![vec![0x03, 0x61, 0x62, 0x63, 0x00]])
    );
    assert_eq!(
        open.unrecognized_parameters.get(&9),
        Some(&vec![vec![0xaa, 0xbb, 0xcc]])
    );

    let body = encode_open_body(&open).unwrap();
    assert_eq!(&body[..], BODY);
}

#[test]
pub fn truncation_test() {
    let body = encode_open_body(&full_open()).unwrap();
    for k in 0..body.len() {
        match decode_open_body(&body[..k]) {
            Err(OpenParseError::TruncatedInput {
                requested,
                available,
            }) => {
                assert!(requested > available);
                assert!(available <= k);
            }
            other => panic!("prefix {} of {} decoded to {:?}", k, body.len(), other),
        }
    }
    assert!(decode_open_body(&body).is_ok());
}

fn many_afi_safi(count: u16) -> OpenMessage {
    let mut open = OpenMessage::new(65001, 90, Ipv4Addr::new(10, 1, 1, 1));
    open.capabilities.afi_safi = (0..count)
        .map(|i| AfiSafi::new(Afi::from(100 + i), Safi::Unicast))
        .collect();
    open
}

#[test]
pub fn extended_opt_params_test() {
    let open = many_afi_safi(60);
    let body = encode_open_body(&open).unwrap();

    // 60 Multiprotocol TLVs of 6 bytes in one Capabilities parameter.
    assert_eq!(body[9], 0xff);
    assert_eq!(body[10], 0xff);
    assert_eq!(u16::from_be_bytes([body[11], body[12]]), 363);
    assert_eq!(body[13], 0x02);
    assert_eq!(u16::from_be_bytes([body[14], body[15]]), 360);
    assert_eq!(body.len(), 13 + 363);

    assert_eq!(decode_open_body(&body).unwrap(), open);
    for k in 0..body.len() {
        assert!(matches!(
            decode_open_body(&body[..k]),
            Err(OpenParseError::TruncatedInput { .. })
        ));
    }
}

#[test]
pub fn long_capability_lists_test() {
    let mut open = OpenMessage::new(65001, 90, Ipv4Addr::new(10, 1, 1, 1));
    let afi_safi = |i: u16| AfiSafi::new(Afi::from(100 + i), Safi::Unicast);
    open.capabilities.add_path = (0..80)
        .map(|i| AddPathValue::new(afi_safi(i), AddPathSendReceive::SendReceive))
        .collect();
    open.capabilities.llgr = (0..40).map(|i| LlgrValue::new(afi_safi(i), 3600)).collect();
    let mut restart = CapRestart::new(120);
    restart.values = (0..70)
        .map(|i| RestartValue::new(afi_safi(i), i % 2 == 0))
        .collect();
    open.capabilities.graceful_restart = Some(restart);

    let body = encode_open_body(&open).unwrap();
    assert_eq!(body[9], 0xff);
    assert_eq!(body[10], 0xff);

    // Graceful Restart splits into 63 + 7 entries, each TLV with its header.
    let caps = &body[16..];
    assert_eq!(&caps[..2], &[64, 254]);
    assert_eq!(&caps[256..258], &[64, 30]);

    assert_eq!(decode_open_body(&body).unwrap(), open);
}

#[test]
pub fn extended_opt_params_disabled_test() {
    let codec = OpenCodec::new(OpenConfig {
        extended_opt_params: false,
        ..Default::default()
    });
    let err = codec.encode_body(&many_afi_safi(60)).unwrap_err();
    assert_eq!(err, OpenParseError::OptParamsTooLong { length: 360 });

    let body = codec.encode_body(&many_afi_safi(40)).unwrap();
    assert_eq!(body[9], 242);
    assert_eq!(codec.decode(&body).unwrap(), many_afi_safi(40));
}

#[test]
pub fn message_size_limit_test() {
    let mut open = OpenMessage::new(70000, 90, Ipv4Addr::new(192, 0, 2, 1));
    open.capabilities.four_octet_as = true;
    open.capabilities.route_refresh = true;

    let codec = OpenCodec::new(OpenConfig {
        max_message_len: 39,
        ..Default::default()
    });
    assert_eq!(codec.encode_message(&open).unwrap().len(), 39);

    let codec = OpenCodec::new(OpenConfig {
        max_message_len: 38,
        ..Default::default()
    });
    assert!(matches!(
        codec.encode_message(&open),
        Err(OpenParseError::Overflow(_))
    ));

    let mut body = MP_BODY.to_vec();
    body.resize(BGP_PACKET_LEN, 0);
    assert_eq!(
        decode_open_body(&body),
        Err(OpenParseError::MessageTooLarge {
            length: BGP_PACKET_LEN + 19,
            max: BGP_PACKET_LEN
        })
    );
}

#[test]
pub fn shared_codec_test() {
    let codec = OpenCodec::default();
    let body = encode_open_body(&full_open()).unwrap();
    std::thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| {
                let open = codec.decode(&body).unwrap();
                assert_eq!(open, full_open());
            });
        }
    });
}

#[test]
pub fn display_test() {
    let open = decode_open_body(MP_BODY).unwrap();
    let output = open.to_string();
    assert!(output.starts_with("Open Message:\n"));
    assert!(output.contains(" AS: 200\n"));
    assert!(output.contains(" BGP Identifier: 10.0.0.1\n"));
    assert!(output.contains(" MultiProtocol: IPv4/Unicast\n"));
}
