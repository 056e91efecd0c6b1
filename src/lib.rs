#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

//! # bisac: BISAC book trade files in Rust
//!
//! Reading and writing the fixed-width BISAC formats used between
//! publishers, distributors and booksellers:
//!
//! - **Title files**: product metadata feeds ([`Message`], [`Product`])
//! - **Purchase orders**: [`Po`], [`PoLineItem`]
//! - **Purchase order acknowledgements**: [`Poa`], [`PoaLineItem`]
//!
//! ## Quick Start
//!
//! ### Reading purchase orders
//!
//! ```
//! use bisac::Po;
//! # use bisac::BisacMessage;
//!
//! # fn main() -> Result<(), bisac::BisacError> {
//! # let data = bisac::Po::new().to_bisac();
//! for po in Po::parse_str(&data) {
//!     let po = po?;
//!     println!("{} orders {} copies", po.source_san, po.total_qty());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ### Writing an acknowledgement
//!
//! ```
//! use bisac::{BisacWriter, Poa, PoaLineItem, PoaStatus};
//!
//! # fn main() -> Result<(), bisac::BisacError> {
//! let mut poa = Poa::new();
//! poa.supplier_poa_number = "0000000019629".to_string();
//!
//! let mut item = PoaLineItem::new();
//! item.set_isbn("0711226067");
//! item.order_qty = 1;
//! item.shippable_qty = 1;
//! item.status = Some(PoaStatus::new(1));
//! poa.items.push(item);
//!
//! let mut buffer = Vec::new();
//! let mut writer = BisacWriter::new(&mut buffer);
//! writer.write_message(&poa)?;
//! writer.finish()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`field`]: Fixed-width field codec
//! - [`isbn`]: ISBN-10 and ISBN-13 validation and conversion
//! - [`record_type`]: Record-type markers per message kind
//! - [`dispatch`]: Building a message from a run of lines
//! - [`reader`]: Assembling messages from line-oriented sources
//! - [`writer`]: Writing messages
//! - [`message`], [`po`], [`poa`]: Message models
//! - [`encoding`]: Character encoding support (UTF-8 and Windows-1252)
//! - [`error`]: Error types and result type

#[macro_use]
pub mod macros;

pub mod dispatch;
pub mod encoding;
pub mod error;
pub mod field;
pub mod isbn;
pub mod message;
pub mod po;
pub mod po_line_item;
pub mod poa;
pub mod poa_line_item;
pub mod poa_status;
pub mod price;
pub mod product;
pub mod reader;
pub mod record_type;
pub mod recovery;
pub mod writer;

pub use dispatch::{build_message, BisacMessage};
pub use encoding::TextEncoding;
pub use error::{BisacError, Result};
pub use message::Message;
pub use po::Po;
pub use po_line_item::PoLineItem;
pub use poa::Poa;
pub use poa_line_item::PoaLineItem;
pub use poa_status::{Outcome, PoaStatus};
pub use price::Price;
pub use product::Product;
pub use reader::{AssemblyState, BisacReader};
pub use record_type::{PoRecordType, PoaRecordType, RecordKind, TitleRecordType};
pub use recovery::RecoveryMode;
pub use writer::{BisacWriter, LineEnding};
