#![allow(dead_code)]

use ferrous_lookup_domain::QueryRequest;
use std::net::Ipv4Addr;

/// A response to `request` echoing its question, with one A answer per
/// address. Answer owners are compressed against the question name.
pub fn a_response(request: &QueryRequest, id: u16, rcode: u8, addresses: &[Ipv4Addr]) -> Vec<u8> {
    let mut bytes = request.to_message().encode();
    bytes[0..2].copy_from_slice(&id.to_be_bytes());
    bytes[2] = 0x81;
    bytes[3] = 0x80 | (rcode & 0x0F);
    bytes[6..8].copy_from_slice(&(addresses.len() as u16).to_be_bytes());

    for address in addresses {
        bytes.extend_from_slice(&[0xC0, 0x0C, 0x00, 0x01, 0x00, 0x01]);
        bytes.extend_from_slice(&300u32.to_be_bytes());
        bytes.extend_from_slice(&4u16.to_be_bytes());
        bytes.extend_from_slice(&address.octets());
    }
    bytes
}
