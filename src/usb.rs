//! Implements USB devices and tasks for transporting HID [KeyboardReport]s to the host, and the
//! display's text over CDC serial.
//! Mostly lifted from [embassy_usb] examples.

use core::sync::atomic::{AtomicBool, Ordering};

use crate::config::{USB_MANUFACTURER, USB_PID, USB_PRODUCT, USB_VID};
use crate::{DISPLAY_CHANNEL, REPORTS_CHANNEL};

use embassy_futures::{
    join::join,
    select::{select, Either},
};
use embassy_rp::{
    peripherals::USB,
    usb::{Driver, InterruptHandler},
    bind_interrupts,
};
use embassy_usb::{
    class::hid::{HidReaderWriter, ReportId, RequestHandler, State as HidState},
    class::cdc_acm::{CdcAcmClass, State as CdcState},
    control::OutResponse,
    Builder, Handler, UsbDevice,
};
use usbd_hid::descriptor::{KeyboardReport, SerializedDescriptor};

use static_cell::StaticCell;

type MyDriver = Driver<'static, USB>;
type MyUsbDevice = UsbDevice<'static, MyDriver>;
type MyHidReaderWriter = HidReaderWriter<'static, MyDriver, 1, 8>;
type MyCdcAcmClass = CdcAcmClass<'static, MyDriver>;

bind_interrupts!(pub(crate) struct Irqs {
    USBCTRL_IRQ => InterruptHandler<USB>;
});

pub fn get_device(driver: MyDriver) -> (UsbDevice<'static, MyDriver>, MyHidReaderWriter, MyCdcAcmClass) {
    let mut config = embassy_usb::Config::new(USB_VID, USB_PID);
    config.manufacturer = Some(USB_MANUFACTURER);
    config.product = Some(USB_PRODUCT);
    config.serial_number = Some("001");
    config.max_power = 100;
    config.max_packet_size_0 = 64;

    static DEVICE_HANDLER: StaticCell<MyDeviceHandler> = StaticCell::new();

    // Create embassy-usb DeviceBuilder using the driver and config.
    static CONFIG_DESC: StaticCell<[u8; 256]> = StaticCell::new();
    static BOS_DESC: StaticCell<[u8; 256]> = StaticCell::new();
    static CONTROL_BUF: StaticCell<[u8; 128]> = StaticCell::new();
    let mut builder = Builder::new(
        driver,
        config,
        &mut CONFIG_DESC.init([0; 256])[..],
        &mut BOS_DESC.init([0; 256])[..],
        &mut [], // no msos descriptors
        &mut CONTROL_BUF.init([0; 128])[..],
    );

    static STATE: StaticCell<HidState> = StaticCell::new();

    builder.handler(DEVICE_HANDLER.init(MyDeviceHandler::new()));

    let config = embassy_usb::class::hid::Config {
        report_descriptor: KeyboardReport::desc(),
        request_handler: None,
        poll_ms: 10,
        max_packet_size: 64,
    };
    let hid = HidReaderWriter::<_, 1, 8>::new(&mut builder, STATE.init(HidState::new()), config);

    let cdc = {
        static STATE: StaticCell<CdcState> = StaticCell::new();
        let state = STATE.init(CdcState::new());
        CdcAcmClass::new(&mut builder, state, 64)
    };

    (builder.build(), hid, cdc)
}

#[embassy_executor::task]
pub async fn run(mut usb: MyUsbDevice, hid: MyHidReaderWriter, mut cdc: MyCdcAcmClass)
{
    let usb_fut = usb.run();

    let (reader, mut writer) = hid.split();

    let in_fut = async {
        let mut last_report: KeyboardReport = KeyboardReport::default();
        loop {
            match select(REPORTS_CHANNEL.receive(), DISPLAY_CHANNEL.receive()).await {
                Either::First(report) => {
                    if report != last_report {
                        if writer.write_serialize(&report).await.is_err() {
                            warn!("failed to send keyboard report");
                        }
                        last_report = report;
                    }
                }
                Either::Second(line) => {
                    // nobody is watching the display unless a terminal has the port open
                    if cdc.dtr() && cdc.write_packet(line.as_bytes()).await.is_err() {
                        warn!("failed to write display line");
                    }
                }
            }
        }
    };

    let out_fut = async {
        static REQUEST_HANDLER: StaticCell<MyRequestHandler> = StaticCell::new();
        reader.run(false, REQUEST_HANDLER.init(MyRequestHandler {})).await;
    };

    join(usb_fut, join(in_fut, out_fut)).await;
}

struct MyRequestHandler;

impl RequestHandler for MyRequestHandler {
    fn get_report(&mut self, id: ReportId, _buf: &mut [u8]) -> Option<usize> {
        trace!("get report for {}", id);
        None
    }

    fn set_report(&mut self, id: ReportId, data: &[u8]) -> OutResponse {
        trace!("set report for {}: {=[u8]}", id, data);
        OutResponse::Accepted
    }

    fn set_idle_ms(&mut self, id: Option<ReportId>, dur: u32) {
        trace!("set idle rate for {} to {=u32}", id, dur);
    }

    fn get_idle_ms(&mut self, id: Option<ReportId>) -> Option<u32> {
        trace!("get idle rate for {}", id);
        None
    }
}

struct MyDeviceHandler {
    configured: AtomicBool,
}

impl MyDeviceHandler {
    fn new() -> Self {
        MyDeviceHandler {
            configured: AtomicBool::new(false),
        }
    }
}

impl Handler for MyDeviceHandler {
    fn enabled(&mut self, enabled: bool) {
        self.configured.store(false, Ordering::Relaxed);
        if enabled {
            info!("usb device enabled");
        } else {
            info!("usb device disabled");
        }
    }

    fn reset(&mut self) {
        self.configured.store(false, Ordering::Relaxed);
        debug!("usb bus reset");
    }

    fn addressed(&mut self, addr: u8) {
        self.configured.store(false, Ordering::Relaxed);
        debug!("usb address set to {=u8}", addr);
    }

    fn configured(&mut self, configured: bool) {
        self.configured.store(configured, Ordering::Relaxed);
        if configured {
            info!("usb device configured");
        } else {
            info!("usb device no longer configured");
        }
    }
}
