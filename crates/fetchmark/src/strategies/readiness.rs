//! Manual non-blocking socket loop
//!
//! Drives one batch of raw sockets through an explicit state machine
//! (Connecting → Writing → Reading → Done) from a readiness-polling loop.
//! A socket that would block yields back to the loop and is resumed the
//! next time the poller reports it ready; the loop exits once no sockets
//! remain pending.

use std::collections::HashMap;
use std::io::{self, Read, Write};
use std::net::SocketAddr;

use mio::net::TcpStream;
use mio::{Events, Interest, Poll, Registry, Token};
use tracing::debug;

use crate::config::HarnessConfig;
use crate::error::CaseError;

use super::{raw_request, Strategy};

const READ_BUF_LEN: usize = 1024;

pub struct ReadinessLoop {
    addr: SocketAddr,
    iterations: usize,
}

impl ReadinessLoop {
    pub fn new(config: &HarnessConfig) -> Self {
        Self {
            addr: config.socket_target,
            iterations: config.iterations,
        }
    }
}

enum Phase {
    Connecting,
    Writing { written: usize },
    Reading,
}

struct SocketTask {
    stream: TcpStream,
    phase: Phase,
}

impl SocketTask {
    /// Advance the state machine as far as readiness allows. Returns true
    /// once the task has read its response and is done.
    fn advance(
        &mut self,
        registry: &Registry,
        token: Token,
        request: &[u8],
    ) -> io::Result<bool> {
        loop {
            match self.phase {
                Phase::Connecting => {
                    // A writable event on a connecting socket means the
                    // connect has resolved one way or the other.
                    if let Some(err) = self.stream.take_error()? {
                        return Err(err);
                    }
                    match self.stream.peer_addr() {
                        Ok(_) => self.phase = Phase::Writing { written: 0 },
                        Err(err) if err.kind() == io::ErrorKind::NotConnected => {
                            return Ok(false);
                        }
                        Err(err) => return Err(err),
                    }
                }
                Phase::Writing { written } => {
                    match self.stream.write(&request[written..]) {
                        Ok(0) => return Err(io::Error::from(io::ErrorKind::WriteZero)),
                        Ok(n) if written + n == request.len() => {
                            registry.reregister(&mut self.stream, token, Interest::READABLE)?;
                            self.phase = Phase::Reading;
                        }
                        Ok(n) => self.phase = Phase::Writing { written: written + n },
                        Err(err) if err.kind() == io::ErrorKind::WouldBlock => return Ok(false),
                        Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                        Err(err) => return Err(err),
                    }
                }
                Phase::Reading => {
                    let mut buf = [0u8; READ_BUF_LEN];
                    match self.stream.read(&mut buf) {
                        // One read completes the exchange, EOF included.
                        Ok(_) => return Ok(true),
                        Err(err) if err.kind() == io::ErrorKind::WouldBlock => return Ok(false),
                        Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                        Err(err) => return Err(err),
                    }
                }
            }
        }
    }
}

impl Strategy for ReadinessLoop {
    fn run(&self) -> Result<(), CaseError> {
        let request = raw_request(&self.addr);

        let mut poll = Poll::new()?;
        let mut events = Events::with_capacity(self.iterations.max(1));
        let mut tasks: HashMap<Token, SocketTask> = HashMap::with_capacity(self.iterations);

        for i in 0..self.iterations {
            let mut stream = TcpStream::connect(self.addr)?;
            let token = Token(i);
            poll.registry()
                .register(&mut stream, token, Interest::WRITABLE)?;
            tasks.insert(
                token,
                SocketTask {
                    stream,
                    phase: Phase::Connecting,
                },
            );
        }

        while !tasks.is_empty() {
            poll.poll(&mut events, None)?;

            for event in events.iter() {
                let token = event.token();
                let done = match tasks.get_mut(&token) {
                    Some(task) => task.advance(poll.registry(), token, &request)?,
                    // Already completed; spurious or stale event.
                    None => continue,
                };

                if done {
                    if let Some(mut task) = tasks.remove(&token) {
                        poll.registry().deregister(&mut task.stream)?;
                        debug!(token = token.0, "socket exchange complete");
                    }
                }
            }
        }

        Ok(())
    }
}
