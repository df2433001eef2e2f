use skyscatter_core::SkyError;
use wgpu::{
    Device, DeviceDescriptor, Instance, InstanceDescriptor, InstanceFlags, PowerPreference, Queue,
    RequestAdapterOptions, Surface, SurfaceConfiguration, TextureFormat, TextureUsages,
};

/// WebGPU resources for one mounted canvas.
pub struct GpuContext {
    pub device: Device,
    pub queue: Queue,
    pub surface: Surface<'static>,
    pub surface_config: SurfaceConfiguration,
    /// sRGB view of the surface; the sky frame is sRGB-encoded.
    pub view_format: TextureFormat,
    pub adapter_name: String,
    pub backend: String,
}

impl GpuContext {
    /// Reconfigure the surface for a new physical size. Zero-area sizes are
    /// ignored; the compositor skips those frames anyway.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if self.surface_config.width == width && self.surface_config.height == height {
            return;
        }
        self.surface_config.width = width;
        self.surface_config.height = height;
        self.surface.configure(&self.device, &self.surface_config);
        log::debug!("Surface reconfigured to {}x{}", width, height);
    }

    /// Reapply the current configuration after a lost or outdated surface.
    pub fn reconfigure(&self) {
        self.surface.configure(&self.device, &self.surface_config);
    }

    pub fn create_view(&self, texture: &wgpu::Texture) -> wgpu::TextureView {
        texture.create_view(&wgpu::TextureViewDescriptor {
            format: Some(self.view_format),
            ..Default::default()
        })
    }
}

/// Initialize WebGPU for `canvas`.
///
/// Requests the `BROWSER_WEBGPU` backend with the default power preference;
/// the scene is a single textured triangle plus the egui overlay.
pub async fn init_gpu(
    canvas: web_sys::HtmlCanvasElement,
    width: u32,
    height: u32,
) -> Result<GpuContext, SkyError> {
    let instance = Instance::new(&InstanceDescriptor {
        backends: wgpu::Backends::BROWSER_WEBGPU,
        flags: InstanceFlags::default(),
        ..Default::default()
    });

    let surface_target = wgpu::SurfaceTarget::Canvas(canvas);
    let surface: Surface<'static> = instance
        .create_surface(surface_target)
        .map_err(|e| SkyError::SurfaceConfigFailed(format!("{e}")))?;

    let adapter = instance
        .request_adapter(&RequestAdapterOptions {
            power_preference: PowerPreference::default(),
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        })
        .await
        .ok_or_else(|| {
            SkyError::AdapterNotFound(
                "No WebGPU adapter found. Your browser may not support WebGPU.".into(),
            )
        })?;

    let adapter_info = adapter.get_info();
    let adapter_name = adapter_info.name.clone();
    let backend = format!("{:?}", adapter_info.backend);
    log::info!("Adapter: {} ({})", adapter_name, backend);

    let (device, queue) = adapter
        .request_device(
            &DeviceDescriptor {
                label: Some("skyscatter-device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                    .using_resolution(adapter.limits()),
                ..Default::default()
            },
            None,
        )
        .await
        .map_err(|e| SkyError::DeviceRequestFailed(format!("{e}")))?;

    let surface_caps = surface.get_capabilities(&adapter);
    let surface_format = surface_caps
        .formats
        .iter()
        .find(|f| f.is_srgb())
        .or_else(|| surface_caps.formats.first())
        .copied()
        .ok_or_else(|| SkyError::SurfaceConfigFailed("surface reports no formats".into()))?;
    // Browser canvases usually expose only non-sRGB formats
    let view_format = surface_format.add_srgb_suffix();
    let alpha_mode = surface_caps
        .alpha_modes
        .first()
        .copied()
        .unwrap_or(wgpu::CompositeAlphaMode::Auto);

    let surface_config = SurfaceConfiguration {
        usage: TextureUsages::RENDER_ATTACHMENT,
        format: surface_format,
        width: width.max(1),
        height: height.max(1),
        present_mode: wgpu::PresentMode::AutoVsync,
        desired_maximum_frame_latency: 2,
        alpha_mode,
        view_formats: if view_format == surface_format {
            vec![]
        } else {
            vec![view_format]
        },
    };
    surface.configure(&device, &surface_config);

    log::info!(
        "Surface format: {:?} (view {:?}), size: {}x{}",
        surface_format,
        view_format,
        surface_config.width,
        surface_config.height
    );

    Ok(GpuContext {
        device,
        queue,
        surface,
        surface_config,
        view_format,
        adapter_name,
        backend,
    })
}
