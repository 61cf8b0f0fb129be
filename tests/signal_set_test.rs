use mio_signals::{Signal, SignalSet};

const ALL: [Signal; 5] = [
    Signal::Interrupt,
    Signal::Quit,
    Signal::Terminate,
    Signal::User1,
    Signal::User2,
];

#[test]
fn test_bitor_combinations() {
    assert_eq!(
        Signal::Terminate | Signal::Quit | Signal::Interrupt | Signal::User1 | Signal::User2,
        SignalSet::all()
    );
    assert_eq!(
        Signal::Terminate | SignalSet::from(Signal::Quit),
        Signal::Quit | Signal::Terminate
    );
    assert_eq!(
        SignalSet::from(Signal::User2) | Signal::Interrupt,
        Signal::Interrupt | Signal::User2
    );
    assert_eq!(
        SignalSet::from(Signal::User1) | SignalSet::from(Signal::Terminate),
        Signal::Terminate | Signal::User1
    );
}

#[test]
fn test_bitor_is_idempotent() {
    let signal = Signal::Quit;
    assert_eq!(signal | Signal::Quit, SignalSet::from(Signal::Quit));
    assert_eq!(Signal::User1 | SignalSet::all(), SignalSet::all());
    assert_eq!(SignalSet::all() | Signal::Interrupt, SignalSet::all());
    assert_eq!(SignalSet::all() | SignalSet::all(), SignalSet::all());
}

#[test]
fn test_set_contents_and_formatting() {
    let cases: Vec<(SignalSet, Vec<Signal>, &str)> = vec![
        (
            SignalSet::all(),
            ALL.to_vec(),
            "Interrupt|Quit|Terminate|User1|User2",
        ),
        (Signal::Interrupt.into(), vec![Signal::Interrupt], "Interrupt"),
        (Signal::User2.into(), vec![Signal::User2], "User2"),
        (
            Signal::Terminate | Signal::Quit,
            vec![Signal::Quit, Signal::Terminate],
            "Quit|Terminate",
        ),
        (
            Signal::User2 | Signal::Interrupt | Signal::Terminate,
            vec![Signal::Interrupt, Signal::Terminate, Signal::User2],
            "Interrupt|Terminate|User2",
        ),
        (
            Signal::User1 | Signal::Quit,
            vec![Signal::Quit, Signal::User1],
            "Quit|User1",
        ),
    ];

    for (set, expected, expected_fmt) in cases {
        assert_eq!(set.len(), expected.len());

        for signal in ALL {
            assert_eq!(set.contains(signal), expected.contains(&signal), "{:?}", signal);
        }
        let expected_set = SignalSet::from_signals(expected.iter().copied()).unwrap();
        assert!(set.contains(expected_set));
        assert_eq!(expected_set, set);

        // Iteration follows the fixed signal order.
        let signals: Vec<Signal> = set.into_iter().collect();
        assert_eq!(signals, expected);
        assert_eq!(set.into_iter().count(), expected.len());
        assert_eq!(
            set.into_iter().size_hint(),
            (expected.len(), Some(expected.len()))
        );

        assert_eq!(format!("{:?}", set), expected_fmt);
        assert_eq!(format!("{:?}", set.into_iter()), expected_fmt);
    }
}

#[test]
fn test_iterator_length_shrinks() {
    let mut iter = SignalSet::all().into_iter();

    for remaining in (0..5).rev() {
        assert!(iter.next().is_some());
        assert_eq!(iter.len(), remaining);
        assert_eq!(iter.size_hint(), (remaining, Some(remaining)));
    }

    assert!(iter.next().is_none());
    assert_eq!(iter.len(), 0);
}

#[test]
fn test_iterator_debug_shows_remaining() {
    let mut iter = (Signal::Interrupt | Signal::Quit | Signal::User1).into_iter();
    assert_eq!(iter.next(), Some(Signal::Interrupt));
    assert_eq!(format!("{:?}", iter), "Quit|User1");
}
