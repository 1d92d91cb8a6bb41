use std::ffi::CString;
use std::num::NonZeroU32;
use std::time::Instant;

use anyhow::{anyhow, Result};
use glam::{Mat4, Vec3, Vec4};
use glow::HasContext;
use glutin::{
    config::ConfigTemplateBuilder,
    context::{ContextApi, ContextAttributesBuilder, GlProfile, PossiblyCurrentContext, Version},
    display::{GetGlDisplay, GlDisplay},
    prelude::*,
    surface::{Surface, WindowSurface},
};
use glutin_winit::{DisplayBuilder, GlWindow};
use log::{info, LevelFilter};
use raw_window_handle::HasRawWindowHandle;
use simple_logger::SimpleLogger;
use winit::{
    dpi::LogicalSize,
    event::{Event, WindowEvent},
    event_loop::EventLoopBuilder,
    window::{Window, WindowBuilder},
};

use shadelink::{ShaderProgram, ShaderSource};

const DEMO_VERT: &str = r#"
#version 330 core
layout (location = 0) in vec3 aPos;
layout (location = 1) in vec3 aColor;

out vec3 VertColor;

uniform mat4 mvp;

void main() {
    gl_Position = mvp * vec4(aPos, 1.0);
    VertColor = aColor;
}
"#;

const DEMO_FRAG: &str = r#"
#version 330 core
in vec3 VertColor;
out vec4 FragColor;

uniform vec4 tint;
uniform float brightness;

void main() {
    FragColor = vec4(VertColor * brightness, 1.0) * tint;
}
"#;

struct App {
    window: Window,
    gl_context: PossiblyCurrentContext,
    gl_surface: Surface<WindowSurface>,
    gl: glow::Context,
    program: ShaderProgram,
    vao: glow::NativeVertexArray,
    vbo: glow::NativeBuffer,
    started: Instant,
}

impl App {
    fn new() -> Result<(Self, winit::event_loop::EventLoop<()>)> {
        SimpleLogger::new().with_level(LevelFilter::Info).init()?;
        info!("Initializing demo...");

        let event_loop = EventLoopBuilder::new().build()?;
        let window_builder = WindowBuilder::new()
            .with_title("shadelink demo")
            .with_inner_size(LogicalSize::new(800, 600));

        let template = ConfigTemplateBuilder::new().with_depth_size(24);

        let display_builder = DisplayBuilder::new().with_window_builder(Some(window_builder));

        let (window, gl_config) = display_builder
            .build(&event_loop, template, |configs| {
                configs
                    .reduce(|accum, config| {
                        if config.num_samples() > accum.num_samples() {
                            config
                        } else {
                            accum
                        }
                    })
                    .unwrap()
            })
            .map_err(|e| anyhow!("failed to pick a GL config: {e}"))?;

        let window = window.ok_or_else(|| anyhow!("display builder produced no window"))?;
        let raw_window_handle = window.raw_window_handle();

        let context_attributes = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
            .with_profile(GlProfile::Core)
            .build(Some(raw_window_handle));

        let gl_display = gl_config.display();

        let gl_context = unsafe {
            gl_display
                .create_context(&gl_config, &context_attributes)
                .expect("Failed to create OpenGL context")
        };

        let attrs = window.build_surface_attributes(<_>::default());
        let gl_surface = unsafe {
            gl_display
                .create_window_surface(&gl_config, &attrs)
                .expect("Failed to create GL surface")
        };

        let gl_context = gl_context
            .make_current(&gl_surface)
            .expect("Failed to make context current");

        let gl = unsafe {
            glow::Context::from_loader_function(|symbol| {
                let symbol = CString::new(symbol).unwrap();
                gl_display.get_proc_address(symbol.as_c_str()) as *const _
            })
        };

        unsafe {
            gl.enable(glow::DEPTH_TEST);
            gl.clear_color(0.2, 0.3, 0.3, 1.0);
        }

        let program = ShaderProgram::new(&gl, &ShaderSource::from_strings(DEMO_VERT, DEMO_FRAG))?;

        // One interleaved triangle: position xyz, color rgb.
        let vertices: [f32; 18] = [
            -0.6, -0.5, 0.0, 1.0, 0.2, 0.2, //
            0.6, -0.5, 0.0, 0.2, 1.0, 0.2, //
            0.0, 0.7, 0.0, 0.2, 0.2, 1.0,
        ];

        let (vao, vbo) = unsafe {
            let vao = gl
                .create_vertex_array()
                .map_err(|e| anyhow!("failed to create vertex array: {e}"))?;
            let vbo = gl
                .create_buffer()
                .map_err(|e| anyhow!("failed to create buffer: {e}"))?;

            gl.bind_vertex_array(Some(vao));
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(&vertices),
                glow::STATIC_DRAW,
            );

            let stride = 6 * std::mem::size_of::<f32>() as i32;
            gl.vertex_attrib_pointer_f32(0, 3, glow::FLOAT, false, stride, 0);
            gl.enable_vertex_attrib_array(0);
            gl.vertex_attrib_pointer_f32(1, 3, glow::FLOAT, false, stride, 12);
            gl.enable_vertex_attrib_array(1);
            gl.bind_vertex_array(None);

            (vao, vbo)
        };

        Ok((
            Self {
                window,
                gl_context,
                gl_surface,
                gl,
                program,
                vao,
                vbo,
                started: Instant::now(),
            },
            event_loop,
        ))
    }

    fn resize(&self, size: winit::dpi::PhysicalSize<u32>) {
        let (Some(width), Some(height)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        else {
            return;
        };
        self.gl_surface.resize(&self.gl_context, width, height);
        unsafe {
            self.gl
                .viewport(0, 0, size.width as i32, size.height as i32);
        }
    }

    fn redraw(&mut self) {
        let t = self.started.elapsed().as_secs_f32();
        let size = self.window.inner_size();
        let aspect = size.width as f32 / size.height.max(1) as f32;

        let projection = Mat4::perspective_rh_gl(45f32.to_radians(), aspect, 0.1, 100.0);
        let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 2.5), Vec3::ZERO, Vec3::Y);
        let model = Mat4::from_rotation_y(t);
        let mvp = projection * view * model;

        unsafe {
            self.gl
                .clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }

        self.program.set_used(&self.gl);
        self.program.set_uniform_mat4(&self.gl, "mvp", &mvp);
        self.program.set_uniform_vec4(&self.gl, "tint", Vec4::ONE);
        self.program
            .set_uniform_1f(&self.gl, "brightness", 0.75 + 0.25 * t.sin());

        unsafe {
            self.gl.bind_vertex_array(Some(self.vao));
            self.gl.draw_arrays(glow::TRIANGLES, 0, 3);
            self.gl.bind_vertex_array(None);
        }

        self.gl_surface
            .swap_buffers(&self.gl_context)
            .expect("Failed to swap buffers");
    }

    fn cleanup(&mut self) {
        self.program.delete(&self.gl);
        unsafe {
            self.gl.delete_vertex_array(self.vao);
            self.gl.delete_buffer(self.vbo);
        }
    }
}

fn main() -> Result<()> {
    let (mut app, event_loop) = App::new()?;

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::CloseRequested => {
                app.cleanup();
                elwt.exit();
            }
            WindowEvent::Resized(size) => app.resize(size),
            WindowEvent::RedrawRequested => app.redraw(),
            _ => (),
        },
        Event::AboutToWait => app.window.request_redraw(),
        _ => (),
    })?;

    Ok(())
}
