use mio::{Events, Interest, Poll, Token};
use mio_signals::{Signal, SignalSet, Signals};

const SIGNAL: Token = Token(0);

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut poll = Poll::new()?;
    let mut events = Events::with_capacity(8);

    // Before any threads are spawned, see `Signals` docs.
    let mut signals = Signals::new(SignalSet::all())?;
    poll.registry()
        .register(&mut signals, SIGNAL, Interest::READABLE)?;

    println!(
        "Call `kill -s TERM {}` to stop the process",
        std::process::id()
    );

    loop {
        poll.poll(&mut events, None)?;

        for event in events.iter() {
            if event.token() != SIGNAL {
                continue;
            }

            while let Some(signal) = signals.receive()? {
                match signal {
                    Signal::Interrupt => println!("Got interrupt signal"),
                    Signal::Quit => println!("Got quit signal"),
                    Signal::User1 => println!("Got user signal 1"),
                    Signal::User2 => println!("Got user signal 2"),
                    Signal::Terminate => {
                        println!("Got terminate signal");
                        return Ok(());
                    }
                }
            }
        }
    }
}
