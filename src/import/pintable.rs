//! Vendor pin table loading.
//!
//! The pin table is an XML document in the `STM32CubeMX` MCU database
//! layout:
//!
//! ```xml
//! <Mcu RefName="STM32F103C(8-B)Tx" Package="LQFP48" …>
//!     <Pin Name="PA1" Position="11" Type="I/O">
//!         <Signal Name="ADC1_IN1"/>
//!         <Signal Name="GPIO"/>
//!     </Pin>
//!     <Pin Name="VDD" Position="24" Type="Power"/>
//! </Mcu>
//! ```
//!
//! Every `Pin` element anywhere below the root is read, in document order.
//! Namespaces are ignored.

use roxmltree::{Document, Node};

use super::{ImportError, ImportResult};

/// One row of the vendor pin table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPin {
    /// Physical placement key (package pad name).
    pub position: String,
    /// Pin name as given by the vendor, e.g. `PC14-OSC32_IN`.
    pub name: String,
    /// Electrical type literal, e.g. `I/O`.
    pub pin_type: String,
    /// Alternate function signal names.
    pub signals: Vec<String>,
}

impl RawPin {
    /// Creates a pin without signals.
    #[must_use]
    pub fn new(
        position: impl Into<String>,
        name: impl Into<String>,
        pin_type: impl Into<String>,
    ) -> Self {
        Self {
            position: position.into(),
            name: name.into(),
            pin_type: pin_type.into(),
            signals: Vec::new(),
        }
    }

    /// Adds attached signal names.
    #[must_use]
    pub fn with_signals<I, S>(mut self, signals: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.signals.extend(signals.into_iter().map(Into::into));
        self
    }
}

/// A parsed pin table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PinTable {
    /// Device reference name from the root element, if present.
    pub ref_name: Option<String>,
    /// Pins in document order.
    pub pins: Vec<RawPin>,
}

/// Parses a pin table document.
///
/// # Errors
///
/// Returns [`ImportError::Format`] if the XML cannot be parsed, a `Pin` lacks
/// one of `Type`, `Name` or `Position`, or a `Signal` lacks `Name`.
pub fn load_pin_table(xml: &str) -> ImportResult<PinTable> {
    let doc = Document::parse(xml).map_err(|e| ImportError::format(e.to_string()))?;
    let root = doc.root_element();

    let pins = root
        .descendants()
        .filter(|n| n.is_element() && n.tag_name().name() == "Pin")
        .enumerate()
        .map(|(index, node)| parse_pin(index, node))
        .collect::<ImportResult<Vec<_>>>()?;

    tracing::debug!(pins = pins.len(), "Loaded pin table");

    Ok(PinTable {
        ref_name: root.attribute("RefName").map(str::to_string),
        pins,
    })
}

fn parse_pin(index: usize, node: Node<'_, '_>) -> ImportResult<RawPin> {
    let pin_type = required_attr(node, "Type", index)?;
    let name = required_attr(node, "Name", index)?;
    let position = required_attr(node, "Position", index)?;

    let signals = node
        .children()
        .filter(|n| n.is_element() && n.tag_name().name() == "Signal")
        .map(|signal| {
            signal.attribute("Name").map(str::to_string).ok_or_else(|| {
                ImportError::format(format!("Signal of pin {position} has no 'Name' attribute"))
            })
        })
        .collect::<ImportResult<Vec<_>>>()?;

    Ok(RawPin {
        position,
        name,
        pin_type,
        signals,
    })
}

fn required_attr(node: Node<'_, '_>, attr: &str, index: usize) -> ImportResult<String> {
    node.attribute(attr).map(str::to_string).ok_or_else(|| {
        ImportError::format(format!("Pin #{index} has no '{attr}' attribute"))
    })
}
