use lorawan_dissect::keys::{AppKey, AppSKey, NwkSKey, MIC};
use lorawan_dissect::maccommands::MacCommand;
use lorawan_dissect::parser::*;
use lorawan_dissect::types::{Direction, Frequency, Region};

fn phy_join_request_payload() -> Vec<u8> {
    vec![
        0x00, 0x04, 0x03, 0x02, 0x01, 0x04, 0x03, 0x02, 0x01, 0x05, 0x04, 0x03, 0x02, 0x05, 0x04,
        0x03, 0x02, 0x2d, 0x10, 0x6a, 0x99, 0x0e, 0x12,
    ]
}

fn phy_join_accept_payload() -> Vec<u8> {
    vec![
        0x20, 0x49, 0x3e, 0xeb, 0x51, 0xfb, 0xa2, 0x11, 0x6f, 0x81, 0x0e, 0xdb, 0x37, 0x42, 0x97,
        0x51, 0x42,
    ]
}

fn phy_join_accept_payload_with_c_f_list() -> Vec<u8> {
    vec![
        0x20, 0xe4, 0x56, 0x73, 0xb6, 0x3c, 0xb4, 0xb9, 0xce, 0xcb, 0x2a, 0xa8, 0x3f, 0x03, 0x33,
        0xe6, 0x15, 0xd2, 0xac, 0x89, 0xee, 0xa1, 0x65, 0x98, 0x37, 0xc3, 0xaa, 0x6d, 0xf9, 0x68,
        0x98, 0x89, 0xcf,
    ]
    //867100000, 867300000, 867500000, 867700000, 867900000
}

fn phy_dataup_payload() -> Vec<u8> {
    vec![
        0x40, 0x04, 0x03, 0x02, 0x01, 0x80, 0x01, 0x00, 0x01, 0xa6, 0x94, 0x64, 0x26, 0x15, 0xd6,
        0xc3, 0xb5, 0x82,
    ]
}

fn phy_datadown_payload() -> Vec<u8> {
    vec![
        0xa0, 0x04, 0x03, 0x02, 0x01, 0x80, 0xff, 0x2a, 0x2a, 0x0a, 0xf1, 0xa3, 0x6a, 0x05, 0xd0,
        0x12, 0x5f, 0x88, 0x5d, 0x88, 0x1d, 0x49, 0xe1,
    ]
}

fn data_payload_with_fport_zero() -> Vec<u8> {
    vec![
        0x40, 0x04, 0x03, 0x02, 0x01, 0x00, 0x00, 0x00, 0x00, 0x69, 0x36, 0x9e, 0xee, 0x6a, 0xa5,
        0x08,
    ]
}

fn data_payload_with_f_opts() -> Vec<u8> {
    vec![
        0x40, 0x04, 0x03, 0x02, 0x01, 0x03, 0x00, 0x00, 0x02, 0x03, 0x05, 0xd7, 0xfa, 0x0c, 0x6c,
    ]
}

fn app_key() -> AppKey {
    AppKey::from([
        0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd, 0xee,
        0xff,
    ])
}

fn warnings_containing(tree: &PhyPdu, needle: &str) -> usize {
    tree.diagnostics.iter().filter(|d| d.message.contains(needle)).count()
}

#[test]
fn test_mhdr_mtype() {
    let examples = [
        (0x00, MType::JoinRequest),
        (0x20, MType::JoinAccept),
        (0x40, MType::UnconfirmedDataUp),
        (0x60, MType::UnconfirmedDataDown),
        (0x80, MType::ConfirmedDataUp),
        (0xa0, MType::ConfirmedDataDown),
        (0xc0, MType::RFU),
        (0xe0, MType::Proprietary),
    ];
    for &(v, expected) in &examples {
        let mhdr = MHDR::new(v);
        assert_eq!(mhdr.mtype(), expected);
    }
}

#[test]
fn test_mhdr_major() {
    let examples = [(0, Major::LoRaWANR1), (1, Major::RFU)];
    for &(v, expected) in &examples {
        let mhdr = MHDR::new(v);
        assert_eq!(mhdr.major(), expected);
    }
}

#[test]
fn test_dissect_empty_payload_is_err() {
    assert_eq!(dissect(&[], &DissectOptions::default()), Err(Error::EmptyPayload));
}

#[test]
fn test_dissect_unconfirmed_uplink_structural() {
    // 40 C1D25201 A5 0500 0307070312 08 64 FE226A9E
    let data = vec![
        0x40, 0xc1, 0xd2, 0x52, 0x01, 0xa5, 0x05, 0x00, 0x03, 0x07, 0x07, 0x03, 0x12, 0x08, 0x64,
        0xfe, 0x22, 0x6a, 0x9e,
    ];
    let tree = dissect(&data, &DissectOptions::default()).unwrap();

    assert_eq!(tree.mhdr.mtype(), MType::UnconfirmedDataUp);
    assert_eq!(tree.mic_in_frame, Some(MIC([0x9e, 0x6a, 0x22, 0xfe])));
    assert_eq!(tree.mic_derived, None);

    let mac = match &tree.body {
        Body::MacPayload(mac) => mac,
        body => panic!("expected a data frame, got {body:?}"),
    };
    assert_eq!(mac.dev_addr, DevAddr::from([0x01, 0x52, 0xd2, 0xc1]));
    assert_eq!(u32::from(mac.dev_addr), 0x0152_d2c1);
    assert!(mac.fctrl.adr());
    assert!(mac.fctrl.ack());
    assert_eq!(mac.fctrl.f_opts_len(), 5);
    assert_eq!(mac.fcnt.value(), 5);
    assert_eq!(mac.fopts.raw, vec![0x03, 0x07, 0x07, 0x03, 0x12]);
    assert_eq!(mac.fopts.commands.len(), 3);
    assert!(matches!(mac.fopts.commands[0], MacCommand::LinkADRAns(_)));
    assert!(matches!(mac.fopts.commands[1], MacCommand::NewChannelAns(_)));
    assert!(matches!(mac.fopts.commands[2], MacCommand::BeaconTimingReq(_)));
    assert_eq!(mac.f_port, Some(8));
    assert_eq!(mac.frm_payload, Some(FRMPayload::Encrypted(vec![0x64])));
    // no keys were supplied, so both decryption and the MIC were skipped
    assert_eq!(warnings_containing(&tree, "AppSKey"), 1);
    assert_eq!(warnings_containing(&tree, "NwkSKey"), 1);
}

#[test]
fn test_dissect_join_request_mic_with_zero_appkey() {
    // 00 0000000000000000 0100009581AB5000 17E3 9FADBC6E
    let data = vec![
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x95, 0x81, 0xab,
        0x50, 0x00, 0x17, 0xe3, 0x9f, 0xad, 0xbc, 0x6e,
    ];
    let opts = DissectOptions { app_key: Some(AppKey::from([0; 16])), ..Default::default() };
    let tree = dissect(&data, &opts).unwrap();

    let request = match &tree.body {
        Body::JoinRequest(request) => request,
        body => panic!("expected a join request, got {body:?}"),
    };
    assert_eq!(request.app_eui, EUI64::from([0; 8]));
    assert_eq!(
        request.dev_eui,
        EUI64::from([0x00, 0x50, 0xab, 0x81, 0x95, 0x00, 0x00, 0x01])
    );
    assert_eq!(request.dev_nonce, DevNonce::from([0xe3, 0x17]));
    assert_eq!(u16::from(request.dev_nonce), 0xe317);

    assert_eq!(tree.mic_in_frame, Some(MIC([0x6e, 0xbc, 0xad, 0x9f])));
    assert_eq!(tree.mic_derived.unwrap().mic, MIC([0x6e, 0xbc, 0xad, 0x9f]));
}

#[test]
fn test_dissect_join_request_wrong_key_mismatch() {
    let opts = DissectOptions { app_key: Some(AppKey::from([2; 16])), ..Default::default() };
    let tree = dissect(&phy_join_request_payload(), &opts).unwrap();
    assert_ne!(Some(tree.mic_derived.unwrap().mic), tree.mic_in_frame);
}

#[test]
fn test_dissect_join_request_valid_mic() {
    let opts = DissectOptions { app_key: Some(AppKey::from([1; 16])), ..Default::default() };
    let tree = dissect(&phy_join_request_payload(), &opts).unwrap();
    assert_eq!(Some(tree.mic_derived.unwrap().mic), tree.mic_in_frame);
}

#[test]
fn test_dissect_join_request_bad_length() {
    let data = vec![0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07];
    let tree = dissect(&data, &DissectOptions::default()).unwrap();
    assert!(matches!(tree.body, Body::Proprietary(_)));
    assert_eq!(warnings_containing(&tree, "Join Request"), 1);
}

#[test]
fn test_dissect_join_accept_without_appkey() {
    let tree = dissect(&phy_join_accept_payload(), &DissectOptions::default()).unwrap();
    let accept = match &tree.body {
        Body::EncryptedJoinAccept(accept) => accept,
        body => panic!("expected an undecrypted join accept, got {body:?}"),
    };
    assert_eq!(accept.payload, phy_join_accept_payload()[1..].to_vec());
    assert_eq!(tree.mic_in_frame, None);
    assert_eq!(tree.mic_derived, None);
    assert_eq!(warnings_containing(&tree, "AppKey"), 1);
}

#[test]
fn test_dissect_join_accept_decrypt_and_mic_with_zero_appkey() {
    // 20 ED8D1A 7B11EA CDD3F52D FC 39 0FFF77E2; plaintext is
    // 248870 010000 248DE503 02 01 88639B03
    let data = vec![
        0x20, 0xed, 0x8d, 0x1a, 0x7b, 0x11, 0xea, 0xcd, 0xd3, 0xf5, 0x2d, 0xfc, 0x39, 0x0f, 0xff,
        0x77, 0xe2,
    ];
    let opts = DissectOptions { app_key: Some(AppKey::from([0; 16])), ..Default::default() };
    let tree = dissect(&data, &opts).unwrap();

    let accept = match &tree.body {
        Body::JoinAccept(accept) => accept,
        body => panic!("expected a decrypted join accept, got {body:?}"),
    };
    assert_eq!(accept.app_nonce, AppNonce::from([0x70, 0x88, 0x24]));
    assert_eq!(accept.net_id, NetId::from([0x00, 0x00, 0x01]));
    assert_eq!(accept.net_id.nwk_id(), 0);
    assert_eq!(accept.dev_addr, DevAddr::from([0x03, 0xe5, 0x8d, 0x24]));
    assert_eq!(accept.dl_settings.rx1_dr_offset(), 0);
    assert_eq!(accept.dl_settings.rx2_data_rate(), 2);
    assert_eq!(accept.rx_delay, 1);
    assert_eq!(accept.c_f_list, None);

    assert_eq!(tree.mic_in_frame, Some(MIC([0x03, 0x9b, 0x63, 0x88])));
    assert_eq!(tree.mic_derived.unwrap().mic, MIC([0x03, 0x9b, 0x63, 0x88]));
}

#[test]
fn test_dissect_join_accept_with_c_f_list() {
    let opts = DissectOptions {
        app_key: Some(AppKey::from([1; 16])),
        region: Region::Eu868,
        ..Default::default()
    };
    let tree = dissect(&phy_join_accept_payload_with_c_f_list(), &opts).unwrap();

    let accept = match &tree.body {
        Body::JoinAccept(accept) => accept,
        body => panic!("expected a decrypted join accept, got {body:?}"),
    };
    assert_eq!(accept.app_nonce, AppNonce::from([0x01, 0x02, 0x03]));
    assert_eq!(accept.rx_delay, 3);
    assert_eq!(accept.dl_settings.rx1_dr_offset(), 1);
    assert_eq!(accept.dl_settings.rx2_data_rate(), 2);

    let c_f_list = accept.c_f_list.as_ref().unwrap();
    assert_eq!(c_f_list.first_channel, 3);
    assert_eq!(c_f_list.c_f_list_type, 0);
    let expected = [
        Frequency::from(&[0x18, 0x4f, 0x84]),
        Frequency::from(&[0xe8, 0x56, 0x84]),
        Frequency::from(&[0xb8, 0x5e, 0x84]),
        Frequency::from(&[0x88, 0x66, 0x84]),
        Frequency::from(&[0x58, 0x6e, 0x84]),
    ];
    assert_eq!(c_f_list.frequencies, expected);
    assert_eq!(c_f_list.frequencies[0].value(), 867_100_000);

    assert_eq!(Some(tree.mic_derived.unwrap().mic), tree.mic_in_frame);
}

#[test]
fn test_dissect_join_accept_c_f_list_us920_unsupported() {
    let opts = DissectOptions {
        app_key: Some(AppKey::from([1; 16])),
        region: Region::Us920,
        ..Default::default()
    };
    let tree = dissect(&phy_join_accept_payload_with_c_f_list(), &opts).unwrap();
    let accept = match &tree.body {
        Body::JoinAccept(accept) => accept,
        body => panic!("expected a decrypted join accept, got {body:?}"),
    };
    assert_eq!(accept.c_f_list, None);
    assert_eq!(warnings_containing(&tree, "US920"), 1);
}

#[test]
fn test_dissect_join_accept_bad_length() {
    let mut data = phy_join_accept_payload();
    data.pop();
    let opts = DissectOptions { app_key: Some(AppKey::from([1; 16])), ..Default::default() };
    let tree = dissect(&data, &opts).unwrap();
    assert!(matches!(tree.body, Body::EncryptedJoinAccept(_)));
    assert_eq!(warnings_containing(&tree, "Join Accept"), 2);
}

#[test]
fn test_derive_session_keys() {
    let key = app_key();
    let opts = DissectOptions { app_key: Some(key), ..Default::default() };

    let request_tree = dissect(&phy_join_request_payload(), &opts).unwrap();
    let dev_nonce = match &request_tree.body {
        Body::JoinRequest(request) => request.dev_nonce,
        body => panic!("expected a join request, got {body:?}"),
    };

    let accept_tree = dissect(&phy_join_accept_payload(), &opts).unwrap();
    let accept = match &accept_tree.body {
        Body::JoinAccept(accept) => accept,
        body => panic!("expected a decrypted join accept, got {body:?}"),
    };
    assert_eq!(Some(accept_tree.mic_derived.unwrap().mic), accept_tree.mic_in_frame);

    let session = accept.derive_session_keys(&dev_nonce, &key);
    let expected_nwk = [
        0x7b, 0xb2, 0x5f, 0x89, 0xe0, 0xd1, 0x37, 0x1e, 0x1f, 0xbf, 0x4d, 0x99, 0x7e, 0x14, 0x68,
        0xa3,
    ];
    let expected_app = [
        0x14, 0x88, 0x20, 0xdf, 0xb1, 0xe0, 0xc9, 0xd6, 0x28, 0x9c, 0xde, 0x16, 0xc1, 0xaf, 0x24,
        0x9f,
    ];
    assert_eq!(session.nwk_skey, NwkSKey::from(expected_nwk));
    assert_eq!(session.app_skey, AppSKey::from(expected_app));
}

#[test]
fn test_dissect_dataup_decrypts_frm_payload() {
    let opts = DissectOptions {
        nwk_skey: Some(NwkSKey::from([2; 16])),
        app_skey: Some(AppSKey::from([1; 16])),
        ..Default::default()
    };
    let tree = dissect(&phy_dataup_payload(), &opts).unwrap();

    let mac = match &tree.body {
        Body::MacPayload(mac) => mac,
        body => panic!("expected a data frame, got {body:?}"),
    };
    assert_eq!(mac.direction(), Direction::Up);
    assert_eq!(mac.dev_addr, DevAddr::from([0x01, 0x02, 0x03, 0x04]));
    assert_eq!(mac.fcnt.value(), 1);
    assert!(mac.fctrl.adr());
    assert!(!mac.fctrl.ack());
    assert!(!mac.fctrl.f_pending());
    assert_eq!(mac.f_port, Some(1));
    assert_eq!(mac.frm_payload, Some(FRMPayload::Application(b"hello".to_vec())));

    assert_eq!(tree.mic_in_frame, Some(MIC([0x82, 0xb5, 0xc3, 0xd6])));
    assert_eq!(Some(tree.mic_derived.unwrap().mic), tree.mic_in_frame);
    assert!(tree.diagnostics.is_empty());
}

#[test]
fn test_dissect_datadown_with_upper_fcnt() {
    let opts = DissectOptions {
        nwk_skey: Some(NwkSKey::from([2; 16])),
        app_skey: Some(AppSKey::from([1; 16])),
        upper_fcnt: 1,
        ..Default::default()
    };
    let tree = dissect(&phy_datadown_payload(), &opts).unwrap();

    let mac = match &tree.body {
        Body::MacPayload(mac) => mac,
        body => panic!("expected a data frame, got {body:?}"),
    };
    assert_eq!(tree.mhdr.mtype(), MType::ConfirmedDataDown);
    assert_eq!(mac.direction(), Direction::Down);
    assert_eq!(mac.fcnt.value(), 76543);
    assert_eq!(mac.fcnt.lower(), 0x2aff);
    assert_eq!(mac.f_port, Some(42));
    assert_eq!(mac.frm_payload, Some(FRMPayload::Application(b"hello lora".to_vec())));
    assert_eq!(Some(tree.mic_derived.unwrap().mic), tree.mic_in_frame);
}

#[test]
fn test_dissect_bad_mic_when_wrong_fcnt() {
    let opts = DissectOptions {
        nwk_skey: Some(NwkSKey::from([2; 16])),
        upper_fcnt: 7,
        ..Default::default()
    };
    let tree = dissect(&phy_dataup_payload(), &opts).unwrap();
    assert_ne!(Some(tree.mic_derived.unwrap().mic), tree.mic_in_frame);
}

#[test]
fn test_dissect_fport_zero_mac_commands() {
    let opts = DissectOptions { nwk_skey: Some(NwkSKey::from([1; 16])), ..Default::default() };
    let tree = dissect(&data_payload_with_fport_zero(), &opts).unwrap();

    let mac = match &tree.body {
        Body::MacPayload(mac) => mac,
        body => panic!("expected a data frame, got {body:?}"),
    };
    assert_eq!(mac.f_port, Some(0));
    let (raw, commands) = match mac.frm_payload.as_ref().unwrap() {
        FRMPayload::MacCommands { raw, commands } => (raw, commands),
        payload => panic!("expected decrypted MAC commands, got {payload:?}"),
    };
    assert_eq!(raw, &vec![0x02, 0x03, 0x05]);
    assert_eq!(commands.len(), 2);
    assert!(matches!(commands[0], MacCommand::LinkCheckReq(_)));
    match &commands[1] {
        MacCommand::LinkADRAns(ans) => {
            assert!(ans.channel_mask_ack());
            assert!(!ans.data_rate_ack());
            assert!(ans.power_ack());
        }
        cmd => panic!("expected LinkADRAns, got {cmd:?}"),
    }
    assert_eq!(Some(tree.mic_derived.unwrap().mic), tree.mic_in_frame);
}

#[test]
fn test_dissect_fport_zero_without_nwkskey_stays_encrypted() {
    let tree = dissect(&data_payload_with_fport_zero(), &DissectOptions::default()).unwrap();
    let mac = match &tree.body {
        Body::MacPayload(mac) => mac,
        body => panic!("expected a data frame, got {body:?}"),
    };
    assert_eq!(mac.frm_payload, Some(FRMPayload::Encrypted(vec![0x69, 0x36, 0x9e])));
    assert_eq!(warnings_containing(&tree, "NwkSKey"), 2);
}

#[test]
fn test_dissect_fhdr_only_frame() {
    let tree = dissect(&data_payload_with_f_opts(), &DissectOptions::default()).unwrap();
    let mac = match &tree.body {
        Body::MacPayload(mac) => mac,
        body => panic!("expected a data frame, got {body:?}"),
    };
    assert_eq!(mac.fctrl.f_opts_len(), 3);
    assert_eq!(mac.fopts.raw, vec![0x02, 0x03, 0x05]);
    assert_eq!(mac.fopts.commands.len(), 2);
    assert_eq!(mac.f_port, None);
    assert_eq!(mac.frm_payload, None);
}

#[test]
fn test_dissect_unknown_cid_stops_fopts_parsing() {
    // FOpts carry LinkCheckReq, then an unregistered CID
    let data = vec![
        0x40, 0x04, 0x03, 0x02, 0x01, 0x03, 0x00, 0x00, 0x02, 0x80, 0x01, 0x01, 0x02, 0x03, 0x04,
    ];
    let tree = dissect(&data, &DissectOptions::default()).unwrap();
    let mac = match &tree.body {
        Body::MacPayload(mac) => mac,
        body => panic!("expected a data frame, got {body:?}"),
    };
    assert_eq!(mac.fopts.raw, vec![0x02, 0x80, 0x01]);
    assert_eq!(mac.fopts.commands.len(), 1);
    assert!(matches!(mac.fopts.commands[0], MacCommand::LinkCheckReq(_)));
    assert_eq!(warnings_containing(&tree, "proprietary MAC command"), 1);
}

#[test]
fn test_dissect_commands_in_both_fopts_and_fport_zero() {
    let data = vec![
        0x40, 0x04, 0x03, 0x02, 0x01, 0x01, 0x00, 0x00, 0x02, 0x00, 0xaa, 0x01, 0x02, 0x03, 0x04,
    ];
    let tree = dissect(&data, &DissectOptions::default()).unwrap();
    let mac = match &tree.body {
        Body::MacPayload(mac) => mac,
        body => panic!("expected a data frame, got {body:?}"),
    };
    assert_eq!(mac.fopts.commands.len(), 1);
    assert_eq!(mac.f_port, Some(0));
    assert_eq!(warnings_containing(&tree, "both FOpts and FRMPayload"), 1);
}

#[test]
fn test_dissect_fopts_len_exceeding_payload() {
    let data = vec![0x40, 0x04, 0x03, 0x02, 0x01, 0x0f, 0x00, 0x00, 0x01, 0x02, 0x03, 0x04];
    let tree = dissect(&data, &DissectOptions::default()).unwrap();
    let mac = match &tree.body {
        Body::MacPayload(mac) => mac,
        body => panic!("expected a data frame, got {body:?}"),
    };
    assert_eq!(mac.f_port, None);
    assert_eq!(mac.frm_payload, None);
    assert_eq!(warnings_containing(&tree, "FOptsLen"), 1);
}

#[test]
fn test_dissect_data_frame_too_short() {
    let data = vec![0x80, 0x04, 0x03, 0x02, 0x01, 0x00, 0xff, 0x01, 0x02, 0x03, 0x04];
    let tree = dissect(&data, &DissectOptions::default()).unwrap();
    assert!(matches!(tree.body, Body::Proprietary(_)));
    assert_eq!(warnings_containing(&tree, "too short"), 1);
}

#[test]
fn test_dissect_fport_present_but_frm_payload_empty() {
    let data = vec![0x40, 0x04, 0x03, 0x02, 0x01, 0x00, 0x00, 0x00, 0x08, 0x01, 0x02, 0x03, 0x04];
    let tree = dissect(&data, &DissectOptions::default()).unwrap();
    let mac = match &tree.body {
        Body::MacPayload(mac) => mac,
        body => panic!("expected a data frame, got {body:?}"),
    };
    assert_eq!(mac.f_port, Some(8));
    assert_eq!(mac.frm_payload, None);
    assert_eq!(warnings_containing(&tree, "payload size is too short"), 1);
}

#[test]
fn test_dissect_proprietary_frame() {
    let data = vec![0xe0, 0x01, 0x02, 0x03, 0x04, 0x05];
    let tree = dissect(&data, &DissectOptions::default()).unwrap();
    assert_eq!(tree.mhdr.mtype(), MType::Proprietary);
    match &tree.body {
        Body::Proprietary(body) => assert_eq!(body.payload, vec![0x01]),
        body => panic!("expected a proprietary body, got {body:?}"),
    }
    assert_eq!(tree.mic_in_frame, Some(MIC([0x05, 0x04, 0x03, 0x02])));
    assert!(tree.diagnostics.is_empty());
}

#[test]
fn test_dissect_rfu_mtype_warns() {
    let data = vec![0xc0, 0x01, 0x02, 0x03, 0x04, 0x05];
    let tree = dissect(&data, &DissectOptions::default()).unwrap();
    assert_eq!(tree.mhdr.mtype(), MType::RFU);
    assert!(matches!(tree.body, Body::Proprietary(_)));
    assert_eq!(warnings_containing(&tree, "RFU message type"), 1);
}

#[test]
fn test_dissect_with_sink_honors_parse_only() {
    use lorawan_dissect::default_crypto::DefaultFactory;

    struct Counter(usize);
    impl Render for Counter {
        fn render(&mut self, _pdu: &PhyPdu) {
            self.0 += 1;
        }
    }

    let mut sink = Counter(0);
    let opts = DissectOptions::default();
    dissect_with_sink(&phy_dataup_payload(), &opts, &DefaultFactory, &mut sink).unwrap();
    assert_eq!(sink.0, 1);

    let opts = DissectOptions { parse_only: true, ..Default::default() };
    dissect_with_sink(&phy_dataup_payload(), &opts, &DefaultFactory, &mut sink).unwrap();
    assert_eq!(sink.0, 1);
}

#[test]
fn test_fctrl_uplink_complete() {
    let byte = 0xff;
    let fctrl = FCtrl::new(byte, Direction::Up, Default::default());
    assert!(fctrl.adr());
    assert!(fctrl.adr_ack_req());
    assert!(fctrl.ack());
    assert!(fctrl.class_b());
    assert!(!fctrl.f_pending());
    assert_eq!(fctrl.f_opts_len(), 15);
    assert_eq!(fctrl.raw_value(), byte);
}

#[test]
fn test_fctrl_downlink_complete() {
    let fctrl = FCtrl::new(0xff, Direction::Down, Default::default());
    assert!(fctrl.f_pending());
    assert!(fctrl.adr_ack_req());
    assert!(!fctrl.class_b());
}

#[test]
fn test_fctrl_v1_0_rfu_bits() {
    use lorawan_dissect::types::Version;
    let up = FCtrl::new(0xff, Direction::Up, Version::V1_0);
    assert!(!up.class_b());
    assert!(up.adr_ack_req());
    let down = FCtrl::new(0xff, Direction::Down, Version::V1_0);
    assert!(!down.adr_ack_req());
    assert!(down.f_pending());
}
