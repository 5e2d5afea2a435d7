//! Abstractions over GPU calls which can be profiled.

use std::sync::Arc;

use miette::{Context, IntoDiagnostic, Result};
use winit::window::Window;

/// GPU state abstracted so GPU calls can be profiled if the feature flags are enabled.
pub(crate) struct Gpu {
    /// GPU device.
    pub(crate) device: wgpu::Device,
    /// GPU queue.
    pub(crate) queue: wgpu::Queue,
    /// GPU surface.
    surface: wgpu::Surface<'static>,
    /// GPU surface configuration.
    config: wgpu::SurfaceConfiguration,
}

impl Gpu {
    /// Create a GPU surface on the window.
    ///
    /// # Errors
    ///
    /// - When no surface can be created on the window.
    /// - When no GPU adapter or device compatible with the surface could be found.
    pub(crate) async fn new(window: Arc<Window>, vsync: bool) -> Result<Self> {
        let size = window.inner_size();

        // Get a handle to our GPU
        let instance = wgpu::Instance::default();

        log::debug!("Creating GPU surface on the window");

        // Create a GPU surface on the window
        let surface = instance
            .create_surface(window)
            .into_diagnostic()
            .wrap_err("Error creating surface on window")?;

        log::debug!("Requesting adapter");

        // Request an adapter
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                force_fallback_adapter: false,
                // Request an adaptar which can render to our surface
                compatible_surface: Some(&surface),
            })
            .await
            .ok_or_else(|| miette::miette!("Error getting GPU adapter for window"))?;

        // Get the surface capabilities
        let swapchain_capabilities = surface.get_capabilities(&adapter);

        // Create the logical device and command queue
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: None,
                    required_features: wgpu::Features::empty(),
                    // WebGL doesn't support all features, so use the lowest limits
                    required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                        .using_resolution(adapter.limits()),
                },
                None,
            )
            .await
            .into_diagnostic()
            .wrap_err("Error getting logical GPU device for surface")?;

        // Prefer an sRGB surface so blending happens in linear space
        let format = swapchain_capabilities
            .formats
            .iter()
            .copied()
            .find(wgpu::TextureFormat::is_srgb)
            .or_else(|| swapchain_capabilities.formats.first().copied())
            .ok_or_else(|| miette::miette!("GPU surface doesn't support any texture format"))?;
        log::debug!("Using surface format {format:?}");

        // Configure the render surface
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            // Ensure that the render surface is at least 1 pixel big, otherwise an error would occur
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: if vsync {
                wgpu::PresentMode::AutoVsync
            } else {
                wgpu::PresentMode::AutoNoVsync
            },
            desired_maximum_frame_latency: 2,
            alpha_mode: swapchain_capabilities
                .alpha_modes
                .first()
                .copied()
                .unwrap_or_default(),
            view_formats: vec![format],
        };
        surface.configure(&device, &config);

        Ok(Self {
            device,
            queue,
            surface,
            config,
        })
    }

    /// Texture format of the surface.
    #[inline]
    pub(crate) const fn format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Resize the surface.
    pub(crate) fn resize(&mut self, width: u32, height: u32) {
        log::debug!("Resizing the surface to ({width}x{height})");

        // Ensure that the render surface is at least 1 pixel big, otherwise an error would occur
        self.config.width = width.max(1);
        self.config.height = height.max(1);
        self.surface.configure(&self.device, &self.config);
    }

    /// Get the next surface texture to draw on.
    ///
    /// # Returns
    ///
    /// - `None` when this frame must be skipped, a lost or outdated surface is reconfigured for the next one.
    ///
    /// # Errors
    ///
    /// - When the GPU ran out of memory.
    pub(crate) fn surface_texture(&mut self) -> Result<Option<wgpu::SurfaceTexture>> {
        profiling::scope!("Retrieve surface texture");

        match self.surface.get_current_texture() {
            Ok(surface_texture) => Ok(Some(surface_texture)),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("GPU surface is lost or outdated, reconfiguring");

                self.surface.configure(&self.device, &self.config);

                Ok(None)
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("Timeout acquiring GPU surface texture, skipping frame");

                Ok(None)
            }
            Err(err) => Err(err)
                .into_diagnostic()
                .wrap_err("Error acquiring next swap chain texture"),
        }
    }
}
