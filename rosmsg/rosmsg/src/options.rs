use rosmsg_core::Dialect;

/// Options for [`parse`](crate::parse).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Parse as ROS 2 `.msg`; otherwise as ROS 1.
    pub ros2: bool,
    /// Parse as ROS 2 IDL. Takes precedence over `ros2`.
    pub ros2idl: bool,
    /// Keep complex type names as written instead of resolving them to the
    /// names of sibling definitions.
    pub skip_type_fixup: bool,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// The dialect selected by the `ros2`/`ros2idl` flags.
    pub fn dialect(&self) -> Dialect {
        if self.ros2idl {
            Dialect::Ros2Idl
        } else if self.ros2 {
            Dialect::Ros2Msg
        } else {
            Dialect::Ros1Msg
        }
    }

    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.ros2 = dialect == Dialect::Ros2Msg;
        self.ros2idl = dialect == Dialect::Ros2Idl;
        self
    }

    pub fn with_skip_type_fixup(mut self, skip: bool) -> Self {
        self.skip_type_fixup = skip;
        self
    }
}

impl From<Dialect> for ParseOptions {
    fn from(dialect: Dialect) -> Self {
        Self::default().with_dialect(dialect)
    }
}
