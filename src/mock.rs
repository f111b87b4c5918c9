//! Test doubles: a recording I2C bus and a minimal executor.
//!
//! `MockI2c` models every module on the bus as a flat register file keyed
//! by `(address, register)`. Reads return the stored bytes (zero when
//! unset) and every transaction is appended to `log` so tests can assert
//! on the exact bus traffic.

use std::collections::HashMap;

use embedded_hal_async::i2c::{ErrorKind, ErrorType, I2c, Operation};

/// One recorded bus transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transaction {
    /// Plain write: address, bytes.
    Write(u8, Vec<u8>),
    /// Register read: address, start register, bytes read.
    WriteRead(u8, u8, usize),
    /// Bare read: address, bytes read.
    Read(u8, usize),
}

#[derive(Default)]
pub struct MockI2c {
    registers: HashMap<(u8, u8), u8>,
    fail: Option<ErrorKind>,
    pub log: Vec<Transaction>,
}

impl MockI2c {
    pub fn new() -> Self {
        Self::default()
    }

    /// Preload consecutive registers starting at `start`.
    pub fn set_registers(&mut self, address: u8, start: u8, values: &[u8]) {
        for (offset, value) in values.iter().enumerate() {
            self.registers
                .insert((address, start.wrapping_add(offset as u8)), *value);
        }
    }

    /// Make every following transaction fail with `kind`.
    pub fn fail_with(&mut self, kind: ErrorKind) {
        self.fail = Some(kind);
    }

    /// Only the writes, in order.
    pub fn writes(&self) -> Vec<(u8, Vec<u8>)> {
        self.log
            .iter()
            .filter_map(|t| match t {
                Transaction::Write(address, bytes) => Some((*address, bytes.clone())),
                _ => None,
            })
            .collect()
    }

    fn register(&self, address: u8, register: u8) -> u8 {
        self.registers
            .get(&(address, register))
            .copied()
            .unwrap_or(0)
    }
}

impl ErrorType for MockI2c {
    type Error = ErrorKind;
}

impl I2c for MockI2c {
    async fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if let Some(kind) = self.fail {
            return Err(kind);
        }

        match operations {
            [Operation::Write(pointer), Operation::Read(buf)] if pointer.len() == 1 => {
                let start = pointer[0];
                for (offset, byte) in buf.iter_mut().enumerate() {
                    *byte = self.register(address, start.wrapping_add(offset as u8));
                }
                self.log
                    .push(Transaction::WriteRead(address, start, buf.len()));
            }
            ops => {
                for op in ops.iter_mut() {
                    match op {
                        Operation::Write(bytes) => {
                            self.log.push(Transaction::Write(address, bytes.to_vec()));
                        }
                        Operation::Read(buf) => {
                            buf.fill(0);
                            self.log.push(Transaction::Read(address, buf.len()));
                        }
                    }
                }
            }
        }

        Ok(())
    }
}

/// Simple blocking executor for async tests (no external deps)
pub fn block_on<F: core::future::Future>(fut: F) -> F::Output {
    use core::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

    fn dummy_raw_waker() -> RawWaker {
        fn no_op(_: *const ()) {}
        fn clone(_: *const ()) -> RawWaker {
            dummy_raw_waker()
        }
        const VTABLE: RawWakerVTable = RawWakerVTable::new(clone, no_op, no_op, no_op);
        RawWaker::new(core::ptr::null(), &VTABLE)
    }

    let waker = unsafe { Waker::from_raw(dummy_raw_waker()) };
    let mut cx = Context::from_waker(&waker);
    let mut fut = core::pin::pin!(fut);

    loop {
        match fut.as_mut().poll(&mut cx) {
            Poll::Ready(result) => return result,
            Poll::Pending => continue,
        }
    }
}
