//! Recording backend for tests.
//!
//! Keeps the same binding state a real backend would and logs every call, so
//! tests can assert on call order and on what is left enabled afterwards.

use std::collections::{BTreeSet, HashMap, HashSet};

use anyhow::Result;

use crate::paint::Color;

use super::backend::{BufferId, GraphicsBackend, ProgramId, Topology, UniformLocation};
use super::program::ProgramDesc;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    SetClearColor(Color),
    Clear,
    UseProgram(Option<ProgramId>),
    EnableAttrib(u32),
    DisableAttrib(u32),
    AttribPointer(u32, BufferId, u32),
    Uniform4f(UniformLocation, Color),
    DrawArrays(Topology, u32, u32),
}

#[derive(Debug, Default)]
pub(crate) struct RecordingBackend {
    pub calls: Vec<Call>,
    pub buffers: HashMap<BufferId, Vec<f32>>,
    pub released: Vec<BufferId>,
    programs: Vec<ProgramDesc>,
    hidden: HashSet<&'static str>,
    enabled: BTreeSet<u32>,
    bound: Option<ProgramId>,
    next_buffer: u32,
}

impl RecordingBackend {
    /// Makes lookups for `name` miss in every program.
    pub fn hide_attribute(&mut self, name: &'static str) {
        self.hidden.insert(name);
    }

    pub fn draw_calls(&self) -> Vec<(Topology, u32, u32)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::DrawArrays(t, first, count) => Some((*t, *first, *count)),
                _ => None,
            })
            .collect()
    }

    pub fn enabled_attribs(&self) -> Vec<u32> {
        self.enabled.iter().copied().collect()
    }

    pub fn bound_program(&self) -> Option<ProgramId> {
        self.bound
    }

    /// Last value written to any uniform.
    pub fn last_uniform(&self) -> Option<Color> {
        self.calls.iter().rev().find_map(|c| match c {
            Call::Uniform4f(_, color) => Some(*color),
            _ => None,
        })
    }

    fn program(&self, id: ProgramId) -> Option<&ProgramDesc> {
        self.programs.get(id.0 as usize)
    }
}

impl GraphicsBackend for RecordingBackend {
    fn create_program(&mut self, desc: &ProgramDesc) -> Result<ProgramId> {
        self.programs.push(desc.clone());
        Ok(ProgramId(self.programs.len() as u32 - 1))
    }

    fn create_buffer(&mut self, _label: &str, data: &[f32]) -> BufferId {
        let id = BufferId(self.next_buffer);
        self.next_buffer += 1;
        self.buffers.insert(id, data.to_vec());
        id
    }

    fn release_buffer(&mut self, buffer: BufferId) {
        if self.buffers.remove(&buffer).is_some() {
            self.released.push(buffer);
        }
    }

    fn set_clear_color(&mut self, color: Color) {
        self.calls.push(Call::SetClearColor(color));
    }

    fn clear(&mut self) {
        self.calls.push(Call::Clear);
    }

    fn use_program(&mut self, program: Option<ProgramId>) {
        self.bound = program;
        self.calls.push(Call::UseProgram(program));
    }

    fn attrib_location(&self, program: ProgramId, name: &str) -> Option<u32> {
        if self.hidden.contains(name) {
            return None;
        }
        self.program(program)?.attribute(name).map(|a| a.location)
    }

    fn uniform_location(&self, program: ProgramId, name: &str) -> Option<UniformLocation> {
        let u = self.program(program)?.uniform(name)?;
        Some(UniformLocation { program, binding: u.binding })
    }

    fn enable_attrib(&mut self, location: u32) {
        self.enabled.insert(location);
        self.calls.push(Call::EnableAttrib(location));
    }

    fn disable_attrib(&mut self, location: u32) {
        self.enabled.remove(&location);
        self.calls.push(Call::DisableAttrib(location));
    }

    fn attrib_pointer(&mut self, location: u32, buffer: BufferId, components: u32) {
        self.calls.push(Call::AttribPointer(location, buffer, components));
    }

    fn uniform4f(&mut self, location: UniformLocation, value: Color) {
        self.calls.push(Call::Uniform4f(location, value));
    }

    fn draw_arrays(&mut self, topology: Topology, first: u32, count: u32) {
        self.calls.push(Call::DrawArrays(topology, first, count));
    }
}
