//! Integration tests for the serial transmit channel.

use rxsim::address_map::SCI0_BASE;
use rxsim::{Peripheral, SerialTx};
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn test_serial_layout() {
    let sci = SerialTx::new();
    assert_eq!(sci.base_address(), SCI0_BASE);
    assert_eq!(sci.size(), 1);
}

#[test]
fn test_hello_world() {
    let mut sci = SerialTx::new();

    for &byte in b"Hello, World!\n" {
        sci.write8(SerialTx::TDR_OFFSET, byte);
    }

    assert_eq!(sci.tx_log(), "Hello, World!\n");
}

#[test]
fn test_callback_and_log_agree() {
    let mut sci = SerialTx::new();
    let received = Rc::new(RefCell::new(String::new()));
    let sink = Rc::clone(&received);
    sci.set_transmit_callback(move |byte| sink.borrow_mut().push(byte as char));

    for &byte in b"RX65N" {
        sci.write8(0, byte);
    }

    assert_eq!(received.borrow().as_str(), "RX65N");
    assert_eq!(sci.tx_log(), "RX65N");
}

#[test]
fn test_receive_path_unmodeled() {
    let mut sci = SerialTx::new();
    sci.write8(0, b'A');
    assert_eq!(sci.read8(0), 0);
}

#[test]
fn test_log_is_append_only_until_cleared() {
    let mut sci = SerialTx::new();
    sci.write8(0, b'1');
    sci.write8(0, b'2');
    assert_eq!(sci.tx_log(), "12");

    sci.clear_tx_log();
    sci.write8(0, b'3');
    assert_eq!(sci.tx_log(), "3");
}
