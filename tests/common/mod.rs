//! Common test helpers and fixtures shared across the test suite.

#![allow(dead_code)]

use bisac::{Message, Po, PoLineItem, Poa, PoaLineItem, PoaStatus, Price, Product};
use std::io::Write;
use tempfile::NamedTempFile;
use tracing_subscriber::EnvFilter;

/// A purchase order with two items, the first carrying title and author.
pub const PO_FILE: &str = "\
00000019013725     Rainbow Book 061112INTERNET.BSC          F039021000
1000002 14976       9013725     9021000     061112000000Y 000000001N     000000
4000003 14976       Y000000000102978513220000100000000000000000000550000000
4100004 14976        Les Miserables
4200005 14976        Hugo, Victor
4000006 14976       Y000000000207538214940000200000000000000000000400000000
5000007 14976       0000600000000020000000003
9000008000000000000200001000000000300001000010000000000000040000100000";

/// An acknowledgement of two lines: one shipped, one backordered.
pub const POA_FILE: &str = "\
02000011111111     PACSTREAM    080904BISACPOA19629         0012222222
1100002000000001962919629        2222222     1111111     080904
40000030000000019629000000000107112260670000100000000000000000  000000000101    9780711226067
40000040000000019629000000000203855198500000600000000000000000  000000000007    9780385519854
590000500000000196290000200000000070000000001
91000060000000000002000010000000007000010000100000000000000200001";

/// Build a purchase order in memory.
pub fn sample_po(po_number: &str, quantities: &[u32]) -> Po {
    let isbns = ["0297851322", "0753821494", "9780385519854", "0711226067"];
    let mut po = Po::new();
    po.source_san = "9013725".to_string();
    po.source_name = "Rainbow Books".to_string();
    po.date = "061112".to_string();
    po.filename = "INTERNET.BSC".to_string();
    po.format_version = "F03".to_string();
    po.destination_san = "9021000".to_string();
    po.po_number = po_number.to_string();
    po.invoice_copies = "01".to_string();

    for (index, qty) in quantities.iter().enumerate() {
        let mut item = PoLineItem::new();
        item.set_isbn(isbns[index % isbns.len()]);
        item.qty = *qty;
        item.price = Price::from_cents(1995);
        if index % 2 == 0 {
            item.title = format!("Title {index}");
            item.author = "Author, Some".to_string();
        }
        po.items.push(item);
    }
    po
}

/// Build an acknowledgement in memory.
pub fn sample_poa(quantities: &[u32]) -> Poa {
    let mut poa = Poa::new();
    poa.source_san = "1111111".to_string();
    poa.source_name = "PACSTREAM".to_string();
    poa.date = "080904".to_string();
    poa.destination_san = "2222222".to_string();
    poa.supplier_poa_number = "0000000019629".to_string();
    poa.po_number = "19629".to_string();

    for qty in quantities {
        let mut item = PoaLineItem::new();
        item.set_isbn("9780711226067");
        item.order_qty = *qty;
        item.shippable_qty = *qty;
        item.unit_price = Price::from_cents(2995);
        item.nett_price = Price::from_cents(1797);
        item.status = Some(PoaStatus::new(1));
        poa.items.push(item);
    }
    poa
}

/// Build a title file with the given number of products.
pub fn sample_message(products: usize) -> Message {
    let mut msg = Message::new("SAND", "9012982", "000001", "1");
    for index in 0..products {
        let mut product = Product::new("0743285689").expect("valid isbn");
        product.set_title(format!("Title number {index}"));
        product.set_author("Begg, Moazzam");
        product.set_price("2995").expect("valid price");
        product.set_pubdate("060101").expect("valid pubdate");
        product.set_status("ACT");
        msg.push(product);
    }
    msg
}

/// Write `content` to a temporary file.
pub fn temp_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write temp file");
    file.flush().expect("Failed to flush temp file");
    file
}

/// Route `tracing` output to the test harness; filter with `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
