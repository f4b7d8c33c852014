use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use conveyor_namespace::{
    AddressSpace, Argument, AttributeSink, AttributeTable, CallRequest, EventSink, InvocationContext, Lifecycle,
    MethodError, MethodHandler, MethodNode, RegistrationError, SinkError,
};
use conveyor_types::{DataType, DeviceEvent, NodeId, Variant};

const URI: &str = "urn:test";

struct Echo;

#[async_trait]
impl MethodHandler for Echo {
    fn input_arguments(&self) -> Vec<Argument> {
        vec![Argument::new("in", DataType::String, "value to echo")]
    }

    fn output_arguments(&self) -> Vec<Argument> {
        vec![Argument::new("out", DataType::String, "echoed value")]
    }

    async fn invoke(
        &self,
        context: &InvocationContext,
        inputs: Vec<Variant>,
    ) -> Result<Vec<Variant>, MethodError> {
        assert_eq!(context.method_id, NodeId::new(1, "echo()"));
        Ok(inputs)
    }
}

fn echo_node() -> MethodNode {
    MethodNode {
        node_id: NodeId::new(1, "echo()"),
        browse_name: "echo".into(),
        description: "echoes its input".into(),
        parent: NodeId::new(1, "Object"),
    }
}

#[test]
fn attribute_table_checks_types() {
    let space = AddressSpace::new(URI);
    let table = space.attributes();
    table
        .declare("Speed", NodeId::new(1, "Obj.Speed"), DataType::Double, Variant::Double(0.0))
        .unwrap();

    table.write("Speed", Variant::Double(12.0)).unwrap();
    assert_eq!(table.value("Speed"), Some(Variant::Double(12.0)));
    assert_eq!(table.node_id("Speed"), Some(NodeId::new(1, "Obj.Speed")));

    assert_eq!(
        table.write("Speed", Variant::UInt16(1)),
        Err(SinkError::TypeMismatch {
            attribute: "Speed".into(),
            expected: DataType::Double,
            actual: DataType::UInt16
        })
    );
    assert_eq!(
        table.write("Missing", Variant::Double(1.0)),
        Err(SinkError::UnknownAttribute("Missing".into()))
    );
    assert_eq!(table.value("Speed"), Some(Variant::Double(12.0)));
}

#[test]
fn attribute_table_rejects_bad_declarations() {
    let space = AddressSpace::new(URI);
    let table = space.attributes();
    table
        .declare("Motors", NodeId::new(1, "Obj.Motors"), DataType::UInt16, Variant::UInt16(4))
        .unwrap();
    assert_eq!(
        table.declare("Motors", NodeId::new(1, "Obj.Motors"), DataType::UInt16, Variant::UInt16(4)),
        Err(RegistrationError::DuplicateAttribute("Motors".into()))
    );
    assert_eq!(
        table.declare("Status", NodeId::new(1, "Obj.Status"), DataType::String, Variant::UInt16(4)),
        Err(RegistrationError::InitialValueMismatch {
            attribute: "Status".into(),
            expected: DataType::String
        })
    );
    assert_eq!(table.len(), 1);
}

struct RecordingLogger {
    lines: Mutex<Vec<String>>,
}

impl log::Log for RecordingLogger {
    fn enabled(&self, _metadata: &log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &log::Record) {
        self.lines.lock().unwrap().push(record.args().to_string());
    }

    fn flush(&self) {}
}

static LOGGER: RecordingLogger = RecordingLogger {
    lines: Mutex::new(Vec::new()),
};

fn logged_lines(needle: &str) -> Vec<String> {
    LOGGER
        .lines
        .lock()
        .unwrap()
        .iter()
        .filter(|line| line.contains(needle))
        .cloned()
        .collect()
}

#[test]
fn attribute_reads_are_logged_when_enabled() {
    _ = log::set_logger(&LOGGER);
    log::set_max_level(log::LevelFilter::Trace);

    let table = AttributeTable::new();
    table
        .declare("LoggedSpeed", NodeId::new(1, "c.LoggedSpeed"), DataType::Double, Variant::Double(4.0))
        .unwrap();
    table
        .declare("QuietSpeed", NodeId::new(1, "c.QuietSpeed"), DataType::Double, Variant::Double(4.0))
        .unwrap();
    assert!(table.log_reads("LoggedSpeed"));
    assert!(!table.log_reads("Missing"));

    assert_eq!(table.value("LoggedSpeed"), Some(Variant::Double(4.0)));
    assert_eq!(table.value("QuietSpeed"), Some(Variant::Double(4.0)));

    let lines = logged_lines("Read LoggedSpeed");
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("ns=1;s=c.LoggedSpeed"));
    assert!(logged_lines("Read QuietSpeed").is_empty());
}

#[tokio::test]
async fn method_registry_validates_calls() {
    let space = AddressSpace::new(URI);
    space.methods().register(echo_node(), Arc::new(Echo)).unwrap();
    assert_eq!(
        space.methods().register(echo_node(), Arc::new(Echo)),
        Err(RegistrationError::DuplicateMethod("echo".into()))
    );

    let object = NodeId::new(1, "Object");
    let out = space
        .call(CallRequest::new("echo", object.clone()).inputs(vec!["hi".into()]))
        .await
        .unwrap();
    assert_eq!(out, vec![Variant::from("hi")]);

    let err = space.call(CallRequest::new("echo", object.clone())).await.unwrap_err();
    assert_eq!(err, MethodError::InvalidArguments { expected: 1, actual: 0 });

    let err = space.call(CallRequest::new("nope", object.clone())).await.unwrap_err();
    assert_eq!(err, MethodError::UnknownMethod("nope".into()));

    space.methods().unregister("echo");
    assert!(space.methods().node("echo").is_none());
}

#[tokio::test]
async fn event_bus_broadcasts_to_subscribers() {
    let space = AddressSpace::new(URI);
    let mut rx = space.events().subscribe();

    let event = DeviceEvent::builder()
        .source(NodeId::new(1, "Object"), "Object")
        .message("hello")
        .build()
        .unwrap();
    space.events().post(event.clone()).unwrap();

    assert_eq!(rx.recv().await.unwrap(), event);
    assert_eq!(space.events().posted(), 1);

    drop(rx);
    space.events().post(event).unwrap();
    assert_eq!(space.events().posted(), 2);
}

struct Recorder {
    name: &'static str,
    log: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl Lifecycle for Recorder {
    async fn startup(&self) {
        self.log.lock().unwrap().push(format!("start {}", self.name));
    }

    async fn shutdown(&self) {
        self.log.lock().unwrap().push(format!("stop {}", self.name));
    }
}

#[tokio::test]
async fn lifecycle_runs_in_order_and_reverse() {
    let space = AddressSpace::new(URI);
    let log = Arc::new(Mutex::new(Vec::new()));
    space.lifecycle().add_lifecycle(Arc::new(Recorder { name: "a", log: log.clone() }));
    space.lifecycle().add_lifecycle(Arc::new(Recorder { name: "b", log: log.clone() }));

    space.startup().await;
    space.startup().await;
    assert!(space.lifecycle().is_running().await);
    space.shutdown().await;
    space.shutdown().await;
    assert!(!space.lifecycle().is_running().await);

    assert_eq!(
        *log.lock().unwrap(),
        vec!["start a", "start b", "stop b", "stop a"]
    );
}
