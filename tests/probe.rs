use pretty_assertions::assert_eq;

use rv32_rs::{DecodeError, FormatConfig, LineSource, Poll, Probe, ProbeError, QueueSource};

#[test]
fn trace_replay_reports_only_changes() {
    let trace = "\
        # reset vector\n\
        0x00000013\n\
        0x00000013\n\
        0x00008067\n\
        0xffffffff\n\
        0xffffffff\n\
        0x30200073\n";
    let mut src = LineSource::new(trace.as_bytes());
    let mut probe = Probe::new(FormatConfig::default());

    let mut shown = Vec::new();
    loop {
        match probe.poll(&mut src).unwrap() {
            Poll::Exhausted => break,
            Poll::Unchanged(_) => {}
            Poll::Decoded(word) => {
                let text = match probe.result().unwrap() {
                    Ok(text) => text.clone(),
                    Err(e) => e.to_string(),
                };
                shown.push(format!("{word:#010x}: {text}"));
            }
        }
    }

    assert_eq!(
        shown,
        vec![
            "0x00000013: addi     x0, x0, 0",
            "0x00008067: jalr     x0, 0(x1)",
            "0xffffffff: invalid instruction 0xffffffff",
            "0x30200073: mret",
        ]
    );
    assert_eq!(probe.decodes(), 4);
}

#[test]
fn probe_uses_its_format_config() {
    let cfg = FormatConfig { mnemonic_width: 8, csr_names: false, unsigned_csr: false };
    let mut probe = Probe::new(cfg.clone());
    assert_eq!(probe.config(), &cfg);
    // csrrs x5, mip, x0
    let (result, _) = probe.update(0x3440_22F3);
    assert_eq!(result.as_deref(), Ok("csrrs   x5, $0x344, x0"));
}

#[test]
fn alternating_words_always_recompute() {
    let mut probe = Probe::new(FormatConfig::default());
    let mut src = QueueSource::new([0x13, 0x73, 0x13, 0x73]);
    for _ in 0..4 {
        assert!(matches!(probe.poll(&mut src).unwrap(), Poll::Decoded(_)));
    }
    assert_eq!(probe.decodes(), 4);
    assert_eq!(probe.result().cloned(), Some(Ok("ecall".to_string())));
}

#[test]
fn invalid_result_keeps_the_raw_word() {
    let mut probe = Probe::new(FormatConfig::default());
    let (result, _) = probe.update(0xDEAD_BEFF);
    assert_eq!(result, &Err(DecodeError::Unrecognized { word: 0xDEAD_BEFF }));
}

#[test]
fn bad_input_line_surfaces_as_source_error() {
    let mut src = LineSource::new("0x13\n0xnothex\n".as_bytes());
    let mut probe = Probe::new(FormatConfig::default());
    assert_eq!(probe.poll(&mut src).unwrap(), Poll::Decoded(0x13));
    let err = probe.poll(&mut src).unwrap_err();
    let ProbeError::Source { polled, .. } = &err;
    assert_eq!(*polled, 1);
    // the cached entry survives the failed poll
    assert_eq!(probe.last_word(), Some(0x13));
}
