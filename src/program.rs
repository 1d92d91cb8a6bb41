use std::collections::HashMap;
use std::fmt;

use glam::{Mat2, Mat3, Mat4, Vec2, Vec3, Vec4};
use glow::HasContext;

use crate::error::ShaderError;
use crate::source::ShaderSource;

/// A compilable stage of a program. The display form is the tag used in
/// compile diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    fn gl_type(self) -> u32 {
        match self {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "VERTEX"),
            ShaderStage::Fragment => write!(f, "FRAGMENT"),
        }
    }
}

/// A linked vertex/fragment program plus a per-program uniform location
/// cache. Every operation takes the owning [`glow::Context`] explicitly;
/// calls must stay on the thread that owns that context.
pub struct ShaderProgram {
    id: glow::NativeProgram,
    uniforms: HashMap<String, Option<glow::NativeUniformLocation>>,
}

impl ShaderProgram {
    /// Compiles both stages and links them. Stage objects are detached and
    /// deleted once the link result is known; nothing is leaked on the
    /// failure paths, and a handle is only returned when both compilation
    /// and linking succeeded.
    pub fn new(gl: &glow::Context, source: &ShaderSource) -> Result<Self, ShaderError> {
        let vertex = Self::compile_stage(gl, ShaderStage::Vertex, &source.vertex)?;
        let fragment = match Self::compile_stage(gl, ShaderStage::Fragment, &source.fragment) {
            Ok(shader) => shader,
            Err(err) => {
                unsafe { gl.delete_shader(vertex) };
                return Err(err);
            }
        };

        let program = match unsafe { gl.create_program() } {
            Ok(program) => program,
            Err(msg) => {
                unsafe {
                    gl.delete_shader(vertex);
                    gl.delete_shader(fragment);
                }
                return Err(ShaderError::Driver(msg));
            }
        };

        // Link status must be queried on the program handle, not on either
        // stage handle.
        let linked = unsafe {
            gl.attach_shader(program, vertex);
            gl.attach_shader(program, fragment);
            gl.link_program(program);
            gl.detach_shader(program, vertex);
            gl.detach_shader(program, fragment);
            gl.delete_shader(vertex);
            gl.delete_shader(fragment);
            gl.get_program_link_status(program)
        };

        if !linked {
            let log = unsafe { gl.get_program_info_log(program) };
            unsafe { gl.delete_program(program) };
            log::error!("PROGRAM_LINKING_ERROR:\n{log}");
            return Err(ShaderError::Link { log });
        }

        log::debug!("linked shader program {program:?}");
        Ok(Self {
            id: program,
            uniforms: HashMap::new(),
        })
    }

    fn compile_stage(
        gl: &glow::Context,
        stage: ShaderStage,
        source: &str,
    ) -> Result<glow::NativeShader, ShaderError> {
        let shader = unsafe { gl.create_shader(stage.gl_type()) }.map_err(ShaderError::Driver)?;

        let compiled = unsafe {
            gl.shader_source(shader, source);
            gl.compile_shader(shader);
            gl.get_shader_compile_status(shader)
        };

        if !compiled {
            let log = unsafe { gl.get_shader_info_log(shader) };
            unsafe { gl.delete_shader(shader) };
            log::error!("SHADER_COMPILATION_ERROR: {stage}\n{log}");
            return Err(ShaderError::Compile { stage, log });
        }

        Ok(shader)
    }

    /// Raw driver handle, for any direct GL calls the caller wants to make.
    pub fn id(&self) -> glow::NativeProgram {
        self.id
    }

    /// Makes this program current for subsequent draw calls and uniform
    /// writes.
    pub fn set_used(&self, gl: &glow::Context) {
        unsafe { gl.use_program(Some(self.id)) };
    }

    /// Deletes the driver object. The program must not be used afterwards;
    /// with the context passed explicitly there is no `Drop` path, so a
    /// forgotten program lives for the process lifetime.
    pub fn delete(&self, gl: &glow::Context) {
        unsafe { gl.delete_program(self.id) };
    }

    /// Cached name-to-location lookup. A name the program does not expose
    /// caches as `None`; setters then skip the write with no diagnostic.
    fn uniform_location(
        &mut self,
        gl: &glow::Context,
        name: &str,
    ) -> Option<glow::NativeUniformLocation> {
        if let Some(cached) = self.uniforms.get(name) {
            return cached.clone();
        }

        let location = unsafe { gl.get_uniform_location(self.id, name) };
        self.uniforms.insert(name.to_string(), location.clone());
        location
    }

    pub fn set_uniform_bool(&mut self, gl: &glow::Context, name: &str, value: bool) {
        self.set_uniform_1i(gl, name, value as i32);
    }

    pub fn set_uniform_1i(&mut self, gl: &glow::Context, name: &str, value: i32) {
        self.set_used(gl);
        let location = self.uniform_location(gl, name);
        unsafe { gl.uniform_1_i32(location.as_ref(), value) };
    }

    pub fn set_uniform_1f(&mut self, gl: &glow::Context, name: &str, value: f32) {
        self.set_used(gl);
        let location = self.uniform_location(gl, name);
        unsafe { gl.uniform_1_f32(location.as_ref(), value) };
    }

    pub fn set_uniform_2f(&mut self, gl: &glow::Context, name: &str, x: f32, y: f32) {
        self.set_used(gl);
        let location = self.uniform_location(gl, name);
        unsafe { gl.uniform_2_f32(location.as_ref(), x, y) };
    }

    pub fn set_uniform_3f(&mut self, gl: &glow::Context, name: &str, x: f32, y: f32, z: f32) {
        self.set_used(gl);
        let location = self.uniform_location(gl, name);
        unsafe { gl.uniform_3_f32(location.as_ref(), x, y, z) };
    }

    pub fn set_uniform_4f(
        &mut self,
        gl: &glow::Context,
        name: &str,
        x: f32,
        y: f32,
        z: f32,
        w: f32,
    ) {
        self.set_used(gl);
        let location = self.uniform_location(gl, name);
        unsafe { gl.uniform_4_f32(location.as_ref(), x, y, z, w) };
    }

    pub fn set_uniform_vec2(&mut self, gl: &glow::Context, name: &str, value: Vec2) {
        self.set_uniform_2f(gl, name, value.x, value.y);
    }

    pub fn set_uniform_vec3(&mut self, gl: &glow::Context, name: &str, value: Vec3) {
        self.set_uniform_3f(gl, name, value.x, value.y, value.z);
    }

    pub fn set_uniform_vec4(&mut self, gl: &glow::Context, name: &str, value: Vec4) {
        self.set_uniform_4f(gl, name, value.x, value.y, value.z, value.w);
    }

    pub fn set_uniform_mat2(&mut self, gl: &glow::Context, name: &str, value: &Mat2) {
        self.set_used(gl);
        let location = self.uniform_location(gl, name);
        unsafe { gl.uniform_matrix_2_f32_slice(location.as_ref(), false, &value.to_cols_array()) };
    }

    pub fn set_uniform_mat3(&mut self, gl: &glow::Context, name: &str, value: &Mat3) {
        self.set_used(gl);
        let location = self.uniform_location(gl, name);
        unsafe { gl.uniform_matrix_3_f32_slice(location.as_ref(), false, &value.to_cols_array()) };
    }

    pub fn set_uniform_mat4(&mut self, gl: &glow::Context, name: &str, value: &Mat4) {
        self.set_used(gl);
        let location = self.uniform_location(gl, name);
        unsafe { gl.uniform_matrix_4_f32_slice(location.as_ref(), false, &value.to_cols_array()) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_display_matches_diagnostic_tags() {
        assert_eq!(ShaderStage::Vertex.to_string(), "VERTEX");
        assert_eq!(ShaderStage::Fragment.to_string(), "FRAGMENT");
    }

    #[test]
    fn stage_maps_to_gl_enums() {
        assert_eq!(ShaderStage::Vertex.gl_type(), glow::VERTEX_SHADER);
        assert_eq!(ShaderStage::Fragment.gl_type(), glow::FRAGMENT_SHADER);
    }
}
