//! Code element bindings shared by the decoder and the encoder
//!
//! Holds the codeset bound into each of C0, C1 and G0-G3 together with the
//! GL/GR invocation pointers, plus a second copy of all of it as resolved at
//! construction. The initial copy shares its `Arc`s with the current one, so
//! `reset` restores the construction-time state without asking the factory
//! again.

use std::sync::Arc;

use asn1_core::{Asn1Error, Asn1Result, CodeElement, CodesetType, ControlElement, Slot};

use crate::codeset::{ControlCodeset, GraphicCodeset};
use crate::config::Iso2022Config;
use crate::factory::CodesetFactory;

type ControlSlots = [Option<Arc<dyn ControlCodeset>>; 2];
type GraphicSlots = [Option<Arc<dyn GraphicCodeset>>; 4];

pub(crate) struct Bindings {
    control: ControlSlots,
    graphic: GraphicSlots,
    pub gl: CodeElement,
    pub gr: CodeElement,
    initial_control: ControlSlots,
    initial_graphic: GraphicSlots,
    initial_gl: CodeElement,
    initial_gr: CodeElement,
}

impl Bindings {
    /// Resolve every configured registration number
    ///
    /// # Errors
    /// The first number that is unknown to the factory or resolves to a set
    /// of the wrong kind for its slot. Sets already resolved are dropped.
    pub fn new(factory: &dyn CodesetFactory, config: &Iso2022Config) -> Asn1Result<Self> {
        let mut control: ControlSlots = Default::default();
        for element in ControlElement::ALL {
            control[element.index()] = resolve_control(factory, element, config.control[element.index()])?;
        }

        let mut graphic: GraphicSlots = Default::default();
        for element in CodeElement::ALL {
            let number = config.graphic[element.index()];
            if number != 0 {
                graphic[element.index()] = Some(resolve_graphic(factory, Slot::Graphic(element), number)?);
            }
        }

        log::debug!(
            "Bound control sets {:?} and graphic sets {:?} (GL={}, GR={})",
            config.control,
            config.graphic,
            config.initial_gl,
            config.initial_gr
        );

        Ok(Self {
            initial_control: control.clone(),
            initial_graphic: graphic.clone(),
            initial_gl: config.initial_gl,
            initial_gr: config.initial_gr,
            control,
            graphic,
            gl: config.initial_gl,
            gr: config.initial_gr,
        })
    }

    /// Restore the construction-time bindings and pointers
    pub fn reset(&mut self) {
        self.control = self.initial_control.clone();
        self.graphic = self.initial_graphic.clone();
        self.gl = self.initial_gl;
        self.gr = self.initial_gr;
    }

    pub fn control(&self, element: ControlElement) -> Option<&Arc<dyn ControlCodeset>> {
        self.control[element.index()].as_ref()
    }

    pub fn graphic(&self, element: CodeElement) -> Option<&Arc<dyn GraphicCodeset>> {
        self.graphic[element.index()].as_ref()
    }

    /// Bind a control set, releasing the previous occupant
    pub fn designate_control(&mut self, element: ControlElement, codeset: Arc<dyn ControlCodeset>) {
        self.control[element.index()] = Some(codeset);
    }

    /// Bind a graphic set, releasing the previous occupant
    pub fn designate(&mut self, element: CodeElement, codeset: Arc<dyn GraphicCodeset>) {
        self.graphic[element.index()] = Some(codeset);
    }

    /// Registration number of the set bound into a graphic element
    pub fn graphic_number(&self, element: CodeElement) -> Option<u32> {
        self.graphic(element).map(|set| set.registration_number())
    }

    /// Registration number of the set bound into a control element
    pub fn control_number(&self, element: ControlElement) -> Option<u32> {
        self.control(element).map(|set| set.registration_number())
    }
}

/// Resolve a control set for `element`; 0 leaves the slot empty
pub(crate) fn resolve_control(
    factory: &dyn CodesetFactory,
    element: ControlElement,
    number: u32,
) -> Asn1Result<Option<Arc<dyn ControlCodeset>>> {
    if number == 0 {
        return Ok(None);
    }

    let slot = Slot::Control(element);
    let codeset = factory
        .get_codeset(number)
        .ok_or(Asn1Error::UnknownCodeset { slot, number })?;

    let found = codeset.codeset_type();
    if found != element.codeset_type() {
        return Err(Asn1Error::CodesetMismatch { slot, number, found });
    }

    codeset
        .into_control()
        .map(Some)
        .ok_or(Asn1Error::CodesetMismatch { slot, number, found })
}

/// Resolve a 94-, 96- or multiple-byte graphic set
pub(crate) fn resolve_graphic(
    factory: &dyn CodesetFactory,
    slot: Slot,
    number: u32,
) -> Asn1Result<Arc<dyn GraphicCodeset>> {
    let codeset = factory
        .get_codeset(number)
        .ok_or(Asn1Error::UnknownCodeset { slot, number })?;

    let found = codeset.codeset_type();
    if !found.is_graphic() {
        return Err(Asn1Error::CodesetMismatch { slot, number, found });
    }
    if slot == Slot::Graphic(CodeElement::G0) && found == CodesetType::G96 {
        return Err(Asn1Error::CodesetMismatch { slot, number, found });
    }

    codeset
        .into_graphic()
        .ok_or(Asn1Error::CodesetMismatch { slot, number, found })
}
