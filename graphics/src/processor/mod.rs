//! Single-threaded replay of command buffers against a backend.
//!
//! The [`RenderCommandProcessor`] owns the backend for its whole lifetime and
//! is the only component that creates, reads or destroys backend-native
//! resource data.

mod state;

use std::any::Any;

use crate::backend::RenderBackend;
use crate::command::{RenderCommand, RenderCommandBuffer, RenderCommandKind, RenderCommandList};
use crate::error::GraphicsResult;
use crate::resources::BackendData;

pub use state::{Binding, ProcessStats, ProcessorState};

/// Replays command buffers, in order and exactly once, against `B`.
///
/// # Panics
///
/// Processing panics on protocol violations: a command whose kind tag cannot
/// be decoded, loading a resource that is already loaded, or drawing with
/// nothing bound. Backend build failures are not violations; they are logged
/// and the resource stays unusable.
pub struct RenderCommandProcessor<B: RenderBackend> {
    backend: B,
    state: ProcessorState,
}

impl<B: RenderBackend> RenderCommandProcessor<B> {
    /// Create a processor that owns `backend`.
    pub fn new(backend: B) -> Self {
        log::debug!("Render command processor using {}", backend.name());
        Self {
            backend,
            state: ProcessorState::default(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Release the backend.
    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Currently bound state.
    pub fn state(&self) -> &ProcessorState {
        &self.state
    }

    /// Replay every list of `buffer` in order.
    ///
    /// The buffer is consumed; resources owned by unload commands and the
    /// frame's dynamic meshes are released once processing returns.
    pub fn process(&mut self, buffer: RenderCommandBuffer) -> ProcessStats {
        frameline_core::profile_function!();

        let (lists, dynamic_meshes) = buffer.into_parts();
        let mut stats = ProcessStats::default();
        for list in &lists {
            self.process_list(list, &mut stats);
        }
        drop(lists);
        drop(dynamic_meshes);

        log::debug!(
            "Processed {} commands in {} lists: {} draws, {} skipped, {} failed loads",
            stats.commands,
            stats.lists,
            stats.draw_calls,
            stats.skipped_draws,
            stats.failed_loads
        );
        stats
    }

    fn process_list(&mut self, list: &RenderCommandList, stats: &mut ProcessStats) {
        stats.lists += 1;
        for entry in list.ordered() {
            let Some(kind) = RenderCommandKind::from_raw(entry.tag()) else {
                log::error!("Unknown render command kind {}", entry.tag());
                panic!(
                    "Unknown render command kind {} at pool index {}",
                    entry.tag(),
                    entry.index()
                );
            };
            let command = list.command(entry);
            if command.kind() != kind {
                log::error!("Render command tag {:?} does not match payload", kind);
                panic!(
                    "Render command tag {:?} does not match payload {:?}",
                    kind,
                    command.kind()
                );
            }
            log::trace!("Processing {:?}", kind);
            self.dispatch(command, stats);
            stats.commands += 1;
        }
    }

    fn dispatch(&mut self, command: &RenderCommand, stats: &mut ProcessStats) {
        let backend = &mut self.backend;
        match command {
            RenderCommand::LoadShader { shader } => {
                let result = guard_load(shader.backend_data(), "shader", shader.name(), || {
                    backend.create_shader(shader)
                });
                record_load(shader.backend_data(), "shader", shader.name(), result, stats);
            }
            RenderCommand::LoadTexture { texture, pixels } => {
                let result = guard_load(texture.backend_data(), "texture", texture.name(), || {
                    backend.create_texture(texture, pixels)
                });
                record_load(texture.backend_data(), "texture", texture.name(), result, stats);
            }
            RenderCommand::LoadMesh {
                mesh,
                vertex_data,
                index_data,
            } => {
                let result = guard_load(mesh.backend_data(), "mesh", mesh.name(), || {
                    backend.create_mesh(mesh, vertex_data, index_data)
                });
                record_load(mesh.backend_data(), "mesh", mesh.name(), result, stats);
            }
            RenderCommand::LoadMaterialGroup { group } => backend.load_material_group(group),
            RenderCommand::UnloadShader { shader } => {
                match shader.backend_data().take::<B::Shader>() {
                    Some(native) => backend.destroy_shader(native),
                    None => log::debug!("Shader '{}' was never loaded", shader.name()),
                }
            }
            RenderCommand::UnloadTexture { texture } => {
                match texture.backend_data().take::<B::Texture>() {
                    Some(native) => backend.destroy_texture(native),
                    None => log::debug!("Texture '{}' was never loaded", texture.name()),
                }
            }
            RenderCommand::UnloadMesh { mesh } => match mesh.backend_data().take::<B::Mesh>() {
                Some(native) => backend.destroy_mesh(native),
                None => log::debug!("Mesh '{}' was never loaded", mesh.name()),
            },
            RenderCommand::UnloadMaterialGroup { group } => backend.unload_material_group(group),
            RenderCommand::Begin {
                resolution,
                clear_colour,
            } => {
                self.state.reset();
                backend.begin(*resolution, *clear_colour);
            }
            RenderCommand::ApplyCamera {
                position,
                view,
                view_projection,
            } => {
                self.state.camera_position = Some(*position);
                backend.apply_camera(position, view, view_projection);
            }
            RenderCommand::ApplyAmbientLight { colour } => {
                self.state.ambient_light = Some(*colour);
                backend.apply_ambient_light(*colour);
            }
            RenderCommand::ApplyMaterial { material } => {
                let usable = material
                    .shader()
                    .backend_data()
                    .with::<B::Shader, _>(|native| match native {
                        Some(native) => {
                            backend.apply_material(material, native);
                            true
                        }
                        None => false,
                    });
                if usable {
                    for (unit, texture) in material.textures().iter().enumerate() {
                        texture
                            .backend_data()
                            .with::<B::Texture, _>(|native| match native {
                                Some(native) => backend.bind_texture(unit as u32, texture, native),
                                None => log::warn!(
                                    "Material '{}' texture '{}' is not loaded",
                                    material.name(),
                                    texture.name()
                                ),
                            });
                    }
                } else {
                    log::warn!(
                        "Material '{}' shader '{}' is not loaded; skipping its draws",
                        material.name(),
                        material.shader().name()
                    );
                }
                self.state.material = Some(Binding {
                    id: material.id(),
                    usable,
                });
            }
            RenderCommand::ApplyMesh { mesh } => {
                let usable = mesh
                    .backend_data()
                    .with::<B::Mesh, _>(|native| match native {
                        Some(native) => {
                            backend.apply_mesh(mesh, native);
                            true
                        }
                        None => false,
                    });
                if !usable {
                    log::warn!("Mesh '{}' is not loaded; skipping its draws", mesh.name());
                }
                self.state.mesh = Some(Binding {
                    id: mesh.id(),
                    usable,
                });
            }
            RenderCommand::ApplyDynamicMesh { mesh } => {
                backend.apply_dynamic_mesh(mesh);
                self.state.mesh = Some(Binding {
                    id: mesh.id(),
                    usable: true,
                });
            }
            RenderCommand::RenderInstance { world_matrix } => {
                let (Some(material), Some(mesh)) = (self.state.material, self.state.mesh) else {
                    log::error!("RenderInstance with nothing bound: {:?}", self.state);
                    panic!("RenderInstance issued without a bound material and mesh");
                };
                if material.usable && mesh.usable {
                    backend.render_instance(world_matrix);
                    stats.draw_calls += 1;
                } else {
                    stats.skipped_draws += 1;
                }
            }
            RenderCommand::End => {
                backend.end();
                self.state.reset();
            }
        }
    }
}

/// Run `create` unless the slot is already occupied, which is a protocol
/// violation.
fn guard_load<T>(
    slot: &BackendData,
    what: &str,
    name: &str,
    create: impl FnOnce() -> GraphicsResult<T>,
) -> GraphicsResult<T> {
    if slot.is_set() {
        log::error!("Attempted to load {} '{}' twice", what, name);
        panic!("{} '{}' is already loaded", what, name);
    }
    create()
}

fn record_load<T: Any + Send + Sync>(
    slot: &BackendData,
    what: &str,
    name: &str,
    result: GraphicsResult<T>,
    stats: &mut ProcessStats,
) {
    match result {
        Ok(native) => {
            let attached = slot.set(native);
            debug_assert!(attached, "{} '{}' slot filled during load", what, name);
            log::trace!("Loaded {} '{}'", what, name);
        }
        Err(err) => {
            log::warn!("Failed to load {} '{}': {}", what, name, err);
            stats.failed_loads += 1;
        }
    }
}
