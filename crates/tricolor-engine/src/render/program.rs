//! Program descriptions and the built-in programs.
//!
//! A program pairs WGSL source with the names it exposes. Names are what the
//! binder looks up, so a missing entry here surfaces as a lookup miss at draw
//! time, the same way an attribute optimized out of a linked shader would.

/// Per-vertex input declared by a program.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct AttributeDesc {
    pub name: &'static str,
    pub location: u32,
    /// Float components per vertex (1..=4).
    pub components: u32,
}

/// `vec4<f32>` uniform declared by a program, bound in group 0.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct UniformDesc {
    pub name: &'static str,
    pub binding: u32,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ProgramDesc {
    pub label: &'static str,
    pub source: &'static str,
    pub vertex_entry: &'static str,
    pub fragment_entry: &'static str,
    pub attributes: &'static [AttributeDesc],
    pub uniforms: &'static [UniformDesc],
}

impl ProgramDesc {
    pub fn attribute(&self, name: &str) -> Option<&AttributeDesc> {
        self.attributes.iter().find(|a| a.name == name)
    }

    pub fn uniform(&self, name: &str) -> Option<&UniformDesc> {
        self.uniforms.iter().find(|u| u.name == name)
    }
}

pub const POSITION_ATTRIB: &str = "a_Position";
pub const COLOR_ATTRIB: &str = "a_Color";
pub const COLOR_UNIFORM: &str = "color";

/// Floats per vertex in position buffers.
pub const POSITION_COMPONENTS: u32 = 2;
/// Floats per vertex in color buffers.
pub const COLOR_COMPONENTS: u32 = 4;

/// Position-only program filled with the `color` uniform.
pub fn flat_color_program() -> ProgramDesc {
    const ATTRS: [AttributeDesc; 1] = [AttributeDesc {
        name: POSITION_ATTRIB,
        location: 0,
        components: POSITION_COMPONENTS,
    }];
    const UNIFORMS: [UniformDesc; 1] = [UniformDesc { name: COLOR_UNIFORM, binding: 0 }];

    ProgramDesc {
        label: "flat color",
        source: include_str!("shaders/flat_color.wgsl"),
        vertex_entry: "vs_main",
        fragment_entry: "fs_main",
        attributes: &ATTRS,
        uniforms: &UNIFORMS,
    }
}

/// Program whose per-vertex `a_Color` is interpolated across each triangle.
pub fn varying_color_program() -> ProgramDesc {
    const ATTRS: [AttributeDesc; 2] = [
        AttributeDesc { name: POSITION_ATTRIB, location: 0, components: POSITION_COMPONENTS },
        AttributeDesc { name: COLOR_ATTRIB, location: 1, components: COLOR_COMPONENTS },
    ];

    ProgramDesc {
        label: "varying color",
        source: include_str!("shaders/varying_color.wgsl"),
        vertex_entry: "vs_main",
        fragment_entry: "fs_main",
        attributes: &ATTRS,
        uniforms: &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_program_exposes_position_and_color_uniform() {
        let p = flat_color_program();
        assert_eq!(p.attribute(POSITION_ATTRIB).map(|a| a.location), Some(0));
        assert!(p.attribute(COLOR_ATTRIB).is_none());
        assert_eq!(p.uniform(COLOR_UNIFORM).map(|u| u.binding), Some(0));
    }

    #[test]
    fn varying_program_has_no_uniforms() {
        let p = varying_color_program();
        assert_eq!(p.attribute(COLOR_ATTRIB).map(|a| a.components), Some(4));
        assert!(p.uniform(COLOR_UNIFORM).is_none());
    }

    #[test]
    fn sources_declare_their_entry_points() {
        for p in [flat_color_program(), varying_color_program()] {
            assert!(p.source.contains(p.vertex_entry), "{}", p.label);
            assert!(p.source.contains(p.fragment_entry), "{}", p.label);
        }
    }
}
