//! One OS thread per request
//!
//! Each thread opens a raw socket, writes the fixed request, half-closes
//! the write side, reads the response to EOF, and closes. All threads are
//! joined before the invocation returns.

use std::io::{Read, Write};
use std::net::{Shutdown, SocketAddr, TcpStream};
use std::sync::Arc;
use std::thread;

use crate::config::HarnessConfig;
use crate::error::CaseError;

use super::{raw_request, Strategy};

pub struct ThreadPerRequest {
    addr: SocketAddr,
    iterations: usize,
}

impl ThreadPerRequest {
    pub fn new(config: &HarnessConfig) -> Self {
        Self {
            addr: config.socket_target,
            iterations: config.iterations,
        }
    }
}

impl Strategy for ThreadPerRequest {
    fn run(&self) -> Result<(), CaseError> {
        let request = Arc::new(raw_request(&self.addr));

        let mut handles = Vec::with_capacity(self.iterations);
        for _ in 0..self.iterations {
            let addr = self.addr;
            let request = Arc::clone(&request);

            handles.push(thread::spawn(move || -> Result<(), CaseError> {
                let mut stream = TcpStream::connect(addr)?;
                stream.write_all(&request)?;
                stream.shutdown(Shutdown::Write)?;

                let mut response = Vec::new();
                stream.read_to_end(&mut response)?;
                Ok(())
            }));
        }

        for handle in handles {
            handle.join().map_err(|_| CaseError::WorkerPanic)??;
        }

        Ok(())
    }
}
