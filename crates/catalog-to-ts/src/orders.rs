//! Score order pass.
//!
//! Emits one marker per `Order` element in `orders.xml`, in the `OrderXML`
//! translation context.

use std::io::Write;

use roxmltree::Document;

use crate::error::Result;
use crate::marker::{MarkerWriter, ORDERS};
use crate::xml::name_text;

pub fn emit_orders<W: Write>(writer: &mut MarkerWriter<W>, xml: &str) -> Result<()> {
    let doc = Document::parse(xml)?;
    for order in doc
        .root_element()
        .children()
        .filter(|n| n.is_element() && n.tag_name().name() == "Order")
    {
        let name = name_text(order)?;
        writer.trace(&format!("Order {}", name));
        writer.add(ORDERS, name, "")?;
    }
    Ok(())
}
