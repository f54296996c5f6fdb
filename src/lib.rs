pub mod approxerror;

pub mod configuration;

pub mod format {
    pub mod numberformat;
}

pub mod math {
    pub mod round;
    pub mod factorial;
    pub mod scalar;
    pub mod realfunction;
}

pub mod ode {
    pub mod eulerstep;
    pub mod eulersmethod;
    pub mod eulerproblem;
    pub mod growthmodel;
}

pub mod precision {
    pub mod scaleddecimal;
    pub mod edigits;
}

pub mod series {
    pub mod serieskind;
    pub mod errorbound;
    pub mod taylorapprox;
    pub mod partialsumcache;
    pub mod partialsum;
}

pub mod special {
    pub mod gamma;
    pub mod zeta;
}

pub mod summation {
    pub mod interval;
    pub mod sumrule;
    pub mod riemannsum;
    pub mod chunkedriemannsum;
    pub mod arclength;
}

pub mod task {
    pub mod cancellation;
    pub mod progress;
}
